//! Runs an actor on its own thread.
use crate::{ActorConfig, ActorError, ActorRequest, ActorResponse, ActorStat, EnvironmentActor};
use crossbeam_channel::{bounded, select, Receiver, Sender};
use lockstep_core::{Action, Env};
use log::info;
use std::thread::JoinHandle;

/// Controller side of an [`EnvironmentActor`] running on a dedicated thread.
///
/// Requests and responses go through bounded channels of capacity 1, so a controller
/// driving several actors typically calls [`ActorHandle::send`] on every actor and
/// then [`ActorHandle::recv`] on every actor. Response `n` always answers request `n`.
pub struct ActorHandle {
    id: usize,
    sender: Sender<ActorRequest>,
    receiver: Receiver<ActorResponse>,
    thread: JoinHandle<Result<ActorStat, ActorError>>,
}

impl ActorHandle {
    /// Spawns an actor thread.
    ///
    /// The environment is built on the new thread, so it does not need to be [`Send`].
    /// If building fails, the thread ends and the failure shows up as
    /// [`ActorError::Disconnected`] on the next request and as the build error in
    /// [`ActorHandle::shutdown`].
    pub fn spawn<E>(id: usize, config: &ActorConfig, env_config: &E::Config) -> Self
    where
        E: Env + 'static,
        E::Config: Send + 'static,
    {
        let (req_s, req_r) = bounded(1);
        let (res_s, res_r) = bounded(1);
        let config = config.clone();
        let env_config = env_config.clone();

        let thread = std::thread::spawn(move || {
            EnvironmentActor::<E>::build(id, &config, &env_config)?.run(req_r, res_s)
        });
        info!("Spawned thread for actor {}", id);

        Self {
            id,
            sender: req_s,
            receiver: res_r,
            thread,
        }
    }

    /// Index of the actor.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Sends an action without waiting for the response.
    pub fn send(&self, act: Action) -> Result<(), ActorError> {
        self.sender
            .send(ActorRequest::Act(act))
            .map_err(|_| ActorError::Disconnected)
    }

    /// Waits for the response to the oldest pending action.
    pub fn recv(&self) -> Result<ActorResponse, ActorError> {
        self.receiver.recv().map_err(|_| ActorError::Disconnected)
    }

    /// Sends an action and waits for the response.
    pub fn act(&self, act: Action) -> Result<ActorResponse, ActorError> {
        self.send(act)?;
        self.recv()
    }

    /// Stops the actor and waits for its thread.
    ///
    /// Pending responses are discarded. Returns the stats of the actor, or the error
    /// that terminated it.
    pub fn shutdown(self) -> Result<ActorStat, ActorError> {
        // Responses are drained while waiting, as the actor may be blocked on sending one
        loop {
            select! {
                send(self.sender, ActorRequest::Shutdown) -> _ => break,
                recv(self.receiver) -> msg => if msg.is_err() { break },
            }
        }
        while self.receiver.recv().is_ok() {}

        self.thread.join().map_err(|_| ActorError::Panicked)?
    }
}
