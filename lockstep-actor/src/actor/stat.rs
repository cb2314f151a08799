use std::time::Duration;

/// Stats of the loop of an [`EnvironmentActor`](crate::EnvironmentActor).
#[derive(Clone, Debug)]
pub struct ActorStat {
    /// Index of the actor.
    pub id: usize,

    /// The number of environment steps.
    pub env_steps: usize,

    /// The number of completed episodes.
    pub episodes: usize,

    /// Duration of the actor loop.
    pub duration: Duration,
}

/// Returns a formatted string of the set of [`ActorStat`] for reporting.
pub fn actor_stats_fmt(stats: &[ActorStat]) -> String {
    let mut s = "actor id, steps, episodes, duration [sec], steps per sec\n".to_string();
    for stat in stats.iter() {
        let d = stat.duration.as_secs_f32();
        let p = if d > 0.0 { stat.env_steps as f32 / d } else { 0.0 };
        s += format!(
            "{}, {}, {}, {}, {}\n",
            stat.id, stat.env_steps, stat.episodes, d, p
        )
        .as_str();
    }
    s
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_fmt() {
        let stats = vec![ActorStat {
            id: 3,
            env_steps: 10,
            episodes: 2,
            duration: Duration::from_secs(2),
        }];
        let s = actor_stats_fmt(&stats);
        assert_eq!(s.lines().nth(1), Some("3, 10, 2, 2, 5"));
    }
}
