use anyhow::Result;
use clap::Parser;
use lockstep_actor::{actor_stats_fmt, ActorConfig, ActorHandle};
use lockstep_core::{
    dummy::{CorridorConfig, CorridorEnv},
    wrappers::{TimeLimit, TimeLimitConfig},
};
use log::info;

type Env = TimeLimit<CorridorEnv>;

/// Drives actors in lock-step with random actions
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The number of actors
    #[arg(short, long, default_value_t = 4)]
    n_actors: usize,

    /// The number of lock-step iterations
    #[arg(short, long, default_value_t = 1000)]
    steps: usize,

    /// YAML file of the actor configuration
    #[arg(short, long)]
    config: Option<String>,

    /// Step limit of episodes
    #[arg(short, long, default_value_t = 64)]
    max_steps: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    fastrand::seed(42);

    let args = Args::parse();
    let config = match args.config.as_ref() {
        Some(path) => ActorConfig::load(path)?,
        None => ActorConfig::default(),
    };
    let env_config = TimeLimitConfig {
        env: CorridorConfig::default().episode_len(100),
        max_steps: args.max_steps,
    };
    let n_actions = env_config.env.n_actions;

    let actors = (0..args.n_actors)
        .map(|id| ActorHandle::spawn::<Env>(id, &config, &env_config))
        .collect::<Vec<_>>();

    let mut n_done = 0;
    for _ in 0..args.steps {
        for actor in actors.iter() {
            actor.send(fastrand::usize(..n_actions))?;
        }
        for actor in actors.iter() {
            let (_history, _reward, _force_done, done, _raw_reward) = actor.recv()?.into_parts();
            if done {
                n_done += 1;
            }
        }
    }
    info!("{} episodes finished", n_done);

    let stats = actors
        .into_iter()
        .map(|actor| actor.shutdown())
        .collect::<Result<Vec<_>, _>>()?;
    info!("Stats of actors");
    info!("{}", actor_stats_fmt(&stats));

    Ok(())
}
