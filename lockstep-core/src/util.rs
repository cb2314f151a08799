//! Utilities for interaction of policies and environments.
use crate::{Env, FramePreprocessor, Policy};
use anyhow::Result;
use log::info;

/// Runs episodes with a policy and returns the mean of the rewards on their last steps.
///
/// The policy sees single preprocessed frames, not stacked histories. For sparse-reward
/// tasks paying only on success, the result is the success rate.
pub fn evaluate<E, F, P>(
    env: &mut E,
    preprocessor: &F,
    policy: &mut P,
    n_episodes: usize,
) -> Result<f32>
where
    E: Env,
    F: FramePreprocessor,
    P: Policy,
{
    let mut rs = Vec::with_capacity(n_episodes);

    for episode in 0..n_episodes {
        let mut obs = preprocessor.process(&env.reset()?)?;
        let mut steps = 0;

        loop {
            let act = env.map_action(policy.sample(&obs));
            let step = env.step(act)?;
            steps += 1;
            if step.is_done() {
                info!("Episode {:?}, {:?} steps, reward = {:?}", episode, steps, step.reward);
                rs.push(step.reward);
                break;
            }
            obs = preprocessor.process(&step.obs)?;
        }
    }

    if rs.is_empty() {
        return Ok(0.0);
    }
    Ok(rs.iter().sum::<f32>() / rs.len() as f32)
}
