use super::{ActorConfig, ActorStat};
use crate::{ActorError, ActorRequest, ActorResponse};
use crossbeam_channel::{Receiver, Sender};
use lockstep_core::{
    Action, Env, EpisodeTracker, FramePreprocessor, GrayscaleResize, History, HistoryBuffer,
    RecentReturns, StickyAction,
};
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// Owns an environment and advances it one step per requested action.
///
/// Every step produces an [`ActorResponse`] holding the stacked history of preprocessed
/// frames. At the end of an episode the environment is reset before responding, so the
/// history sent with `done == true` consists of the first frame of the next episode only.
///
/// The preprocessor `P` and the episode tracker `T` are strategy objects and can be
/// replaced with [`EnvironmentActor::with_parts`].
pub struct EnvironmentActor<E, P = GrayscaleResize, T = RecentReturns>
where
    E: Env,
    P: FramePreprocessor,
    T: EpisodeTracker,
{
    /// Index of the actor, used in logs.
    id: usize,
    env: E,
    preprocessor: P,
    history: HistoryBuffer,
    sticky: StickyAction,
    tracker: T,
    render: bool,
    life_done: bool,

    // Lives after the last step, for environments having lives
    lives: Option<usize>,

    env_steps: usize,
    episodes: usize,
}

impl<E: Env> EnvironmentActor<E> {
    /// Builds the environment and the default pipeline, then resets the environment.
    ///
    /// The environment is built with the actor index as its seed.
    pub fn build(id: usize, config: &ActorConfig, env_config: &E::Config) -> Result<Self, ActorError> {
        config.validate()?;
        let preprocessor = GrayscaleResize::new(config.height, config.width, config.interpolation)?;
        let env = E::build(env_config, id as i64).map_err(ActorError::EnvironmentFault)?;
        Self::with_parts(id, config, env, preprocessor, RecentReturns::new())
    }
}

impl<E, P, T> EnvironmentActor<E, P, T>
where
    E: Env,
    P: FramePreprocessor,
    T: EpisodeTracker,
{
    /// Assembles an actor from its parts and resets the environment.
    ///
    /// `config.height` and `config.width` are ignored; the frame shape is taken from
    /// the preprocessor.
    pub fn with_parts(
        id: usize,
        config: &ActorConfig,
        env: E,
        preprocessor: P,
        tracker: T,
    ) -> Result<Self, ActorError> {
        config.validate()?;
        let [height, width] = preprocessor.shape();
        let sticky = match config.seed {
            Some(seed) => {
                StickyAction::with_seed(config.sticky_action, config.sticky_prob, seed.wrapping_add(id as u64))
            }
            None => StickyAction::new(config.sticky_action, config.sticky_prob),
        };

        let mut actor = Self {
            id,
            env,
            preprocessor,
            history: HistoryBuffer::new(config.history_size, height, width),
            sticky,
            tracker,
            render: config.render,
            life_done: config.life_done,
            lives: None,
            env_steps: 0,
            episodes: 0,
        };
        actor.reset()?;
        Ok(actor)
    }

    /// Index of the actor.
    pub fn id(&self) -> usize {
        self.id
    }

    /// The environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// The episode tracker.
    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    /// Returns a copy of the current history.
    pub fn history(&self) -> History {
        self.history.snapshot()
    }

    /// Starts a new episode: resets the environment and the sticky action, and fills the
    /// history with the first frame.
    pub fn reset(&mut self) -> Result<(), ActorError> {
        self.sticky.reset();
        let obs = self.env.reset().map_err(ActorError::EnvironmentFault)?;
        self.lives = self.env.lives();
        let frame = self.preprocessor.process(&obs)?;
        self.history.initialize(&frame)?;
        debug!("Reset environment of actor {}", self.id);
        Ok(())
    }

    fn life_lost(&mut self) -> bool {
        let lives = self.env.lives();
        let lost = match (self.lives, lives) {
            (Some(prev), Some(now)) => now < prev && now > 0,
            _ => false,
        };
        self.lives = lives;
        self.life_done && lost
    }

    /// Performs one iteration of the actor loop for a requested action.
    pub fn step(&mut self, act: Action) -> Result<ActorResponse, ActorError> {
        let n_actions = self.env.n_actions();
        if act >= n_actions {
            return Err(ActorError::ProtocolViolation(format!(
                "action {} is out of the action space of size {}",
                act, n_actions
            )));
        }
        let act = self.sticky.apply(self.env.map_action(act));

        let step = self.env.step(act).map_err(ActorError::EnvironmentFault)?;
        if self.render {
            self.env.render().map_err(ActorError::EnvironmentFault)?;
        }
        self.env_steps += 1;

        let done = step.is_done();
        let force_done = self.life_lost() || done;
        let reward = step.reward;

        let frame = self.preprocessor.process(&step.obs)?;
        self.history.push(&frame)?;
        self.tracker.on_step(reward);

        if done {
            let summary = self.tracker.on_episode_end();
            self.episodes += 1;
            info!("[Episode {}({})] {}", summary.episode, self.id, summary);
            self.reset()?;
        }

        Ok(ActorResponse {
            history: self.history.snapshot(),
            reward,
            force_done,
            done,
            raw_reward: reward,
        })
    }

    /// Runs the actor loop until [`ActorRequest::Shutdown`] arrives or the controller
    /// drops its end of the request channel.
    ///
    /// Errors are fatal: the loop stops and the channel endpoints are dropped.
    pub fn run(
        mut self,
        receiver: Receiver<ActorRequest>,
        sender: Sender<ActorResponse>,
    ) -> Result<ActorStat, ActorError> {
        info!("Starts actor {}", self.id);
        let time = Instant::now();

        loop {
            match receiver.recv() {
                Ok(ActorRequest::Act(act)) => {
                    let response = self.step(act)?;
                    sender.send(response).map_err(|_| ActorError::Disconnected)?;
                }
                Ok(ActorRequest::Shutdown) => {
                    info!("Stops actor {}", self.id);
                    break;
                }
                Err(_) => {
                    warn!("Controller of actor {} hung up", self.id);
                    break;
                }
            }
        }

        Ok(self.stat(time.elapsed()))
    }

    /// Stats of the actor.
    pub fn stat(&self, duration: Duration) -> ActorStat {
        ActorStat {
            id: self.id,
            env_steps: self.env_steps,
            episodes: self.episodes,
            duration,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use lockstep_core::{
        dummy::{CorridorConfig, CorridorEnv},
        Frame, PreprocessError, RawObs,
    };
    use ndarray::Array2;
    use test_log::test;

    type Actor = EnvironmentActor<CorridorEnv>;

    fn config() -> ActorConfig {
        ActorConfig::default()
            .sticky_prob(0.0)
            .interpolation(lockstep_core::Interpolation::Nearest)
    }

    fn values(history: &History) -> Vec<f32> {
        history.outer_iter().map(|f| f[[0, 0]]).collect()
    }

    fn intensity(t: usize, act: Action) -> f32 {
        CorridorEnv::intensity(t, act) as f32
    }

    fn reset_intensity(n: usize) -> f32 {
        CorridorEnv::reset_intensity(n) as f32
    }

    #[test]
    fn test_initial_history() -> Result<(), ActorError> {
        let actor = Actor::build(0, &config(), &CorridorConfig::default())?;
        assert_eq!(actor.history().dim(), (4, 7, 7));
        assert_eq!(values(&actor.history()), vec![reset_intensity(1); 4]);
        Ok(())
    }

    #[test]
    fn test_three_steps_then_done() -> Result<(), ActorError> {
        let env_config = CorridorConfig::default().episode_len(3);
        let mut actor = Actor::build(0, &config(), &env_config)?;
        let f0 = reset_intensity(1);

        let r1 = actor.step(2)?;
        assert_eq!(values(&r1.history), vec![f0, f0, f0, intensity(1, 2)]);
        let r2 = actor.step(2)?;
        assert_eq!(
            values(&r2.history),
            vec![f0, f0, intensity(1, 2), intensity(2, 2)]
        );
        assert!(!r2.done && !r2.force_done);

        // The third step ends the episode, the history is re-seeded with the new first frame
        let r3 = actor.step(2)?;
        assert!(r3.done && r3.force_done);
        assert_eq!(r3.reward, 1.0);
        assert_eq!(r3.raw_reward, 1.0);
        assert!(r3.history.iter().all(|&v| v == reset_intensity(2)));
        assert_eq!(actor.env().actions(), &[2, 2, 2]);
        Ok(())
    }

    #[test]
    fn test_history_without_done() -> Result<(), ActorError> {
        let env_config = CorridorConfig::default().episode_len(10);
        let mut actor = Actor::build(0, &config(), &env_config)?;
        let f0 = reset_intensity(1);
        let mut last = None;
        for _ in 0..3 {
            last = Some(actor.step(2)?);
        }
        let history = last.unwrap().history;
        assert_eq!(
            values(&history),
            vec![f0, intensity(1, 2), intensity(2, 2), intensity(3, 2)]
        );
        Ok(())
    }

    #[test]
    fn test_episode_bookkeeping() -> Result<(), ActorError> {
        let env_config = CorridorConfig::default().episode_len(4);
        let mut actor = Actor::build(0, &config(), &env_config)?;
        let rewards = (0..4)
            .map(|_| actor.step(1).map(|r| r.reward))
            .collect::<Result<Vec<_>, _>>()?;
        assert_eq!(rewards, vec![0.0, 0.0, 0.0, 1.0]);
        assert_eq!(actor.tracker().episodes(), 1);
        assert_eq!(actor.tracker().recent().back(), Some(&1.0));
        assert_eq!(actor.tracker().steps(), 0);

        let stat = actor.stat(Duration::from_secs(1));
        assert_eq!(stat.env_steps, 4);
        assert_eq!(stat.episodes, 1);
        assert_eq!(actor.env().resets(), 2);
        Ok(())
    }

    #[test]
    fn test_sticky_repeats_executed_action() -> Result<(), ActorError> {
        let config = config().sticky_prob(1.0);
        let env_config = CorridorConfig::default().episode_len(3);
        let mut actor = Actor::build(0, &config, &env_config)?;
        for a in 1..7 {
            actor.step(a)?;
        }
        // Last action starts at 0 in every episode
        assert_eq!(actor.env().actions(), &[0; 6]);
        Ok(())
    }

    #[test]
    fn test_action_out_of_range() -> Result<(), ActorError> {
        let mut actor = Actor::build(0, &config(), &CorridorConfig::default())?;
        assert!(matches!(
            actor.step(7),
            Err(ActorError::ProtocolViolation(_))
        ));
        assert!(actor.env().actions().is_empty());
        Ok(())
    }

    #[test]
    fn test_environment_fault() -> Result<(), ActorError> {
        let env_config = CorridorConfig::default().fail_at_step(2);
        let mut actor = Actor::build(0, &config(), &env_config)?;
        actor.step(0)?;
        assert!(matches!(
            actor.step(0),
            Err(ActorError::EnvironmentFault(_))
        ));
        Ok(())
    }

    #[test]
    fn test_render_after_each_step() -> Result<(), ActorError> {
        let env_config = CorridorConfig::default().episode_len(2);
        let mut actor = Actor::build(0, &config().render(true), &env_config)?;
        for _ in 0..3 {
            actor.step(1)?;
        }
        assert_eq!(actor.env().renders(), 3);

        let mut actor = Actor::build(0, &config(), &env_config)?;
        actor.step(1)?;
        assert_eq!(actor.env().renders(), 0);
        Ok(())
    }

    #[test]
    fn test_render_fault() -> Result<(), ActorError> {
        let env_config = CorridorConfig::default().fail_render(true);
        let mut actor = Actor::build(0, &config().render(true), &env_config)?;
        assert!(matches!(
            actor.step(1),
            Err(ActorError::EnvironmentFault(_))
        ));
        Ok(())
    }

    #[test]
    fn test_life_loss_forces_done() -> Result<(), ActorError> {
        let env_config = CorridorConfig::default().episode_len(6).lives(3, 2);
        let mut actor = Actor::build(0, &config(), &env_config)?;
        let flags = (0..6)
            .map(|_| actor.step(0).map(|r| (r.force_done, r.done)))
            .collect::<Result<Vec<_>, _>>()?;
        assert_eq!(
            flags,
            vec![
                (false, false),
                (true, false),
                (false, false),
                (true, false),
                (false, false),
                (true, true),
            ]
        );

        let mut actor = Actor::build(0, &config().life_done(false), &env_config)?;
        for _ in 0..5 {
            let r = actor.step(0)?;
            assert!(!r.force_done);
        }
        Ok(())
    }

    #[test]
    fn test_tuple_observations() -> Result<(), ActorError> {
        let env_config = CorridorConfig::default().tuple_obs(true).size(14, 14);
        let mut actor = Actor::build(0, &config(), &env_config)?;
        let r = actor.step(3)?;
        assert_eq!(r.history.dim(), (4, 7, 7));
        assert_eq!(values(&r.history)[3], intensity(1, 3));
        Ok(())
    }

    struct Broken;

    impl FramePreprocessor for Broken {
        fn process(&self, _obs: &RawObs) -> Result<Frame, PreprocessError> {
            Ok(Array2::zeros((3, 3)))
        }

        fn shape(&self) -> [usize; 2] {
            [7, 7]
        }
    }

    #[test]
    fn test_preprocess_error_is_fatal() -> anyhow::Result<()> {
        let env = CorridorEnv::build(&CorridorConfig::default(), 0)?;
        let res = EnvironmentActor::with_parts(0, &config(), env, Broken, RecentReturns::new());
        assert!(matches!(
            res,
            Err(ActorError::Preprocess(PreprocessError::FrameShape { .. }))
        ));
        Ok(())
    }
}
