//! `sentry-notify send` — deliver one notification.
//!
//! Builds a [`NotifyTask`] from `--task` and the command-line flags and
//! executes it once. The command exits successfully even when delivery
//! fails: the failure is logged and the calling task carries on.

use crate::capability;
use crate::cli::SendArgs;
use crate::error::NotifierError;
use crate::notify::{DispatchOutcome, Dispatcher};
use crate::task::NotifyTask;

pub fn execute(args: SendArgs) -> Result<(), NotifierError> {
    if !capability::is_available() {
        return Ok(());
    }

    let task = match build_task(&args) {
        Ok(task) => task,
        Err(e) => {
            tracing::error!(error = %e, "failed to send notification to sentry");
            return Ok(());
        }
    };

    let dispatcher = match args.client.resolver() {
        Ok(resolver) => Dispatcher::new(resolver),
        Err(e) => {
            tracing::error!(error = %e, "failed to send notification to sentry");
            return Ok(());
        }
    };

    if let DispatchOutcome::Delivered { event_id } =
        task.execute_with(&dispatcher, args.client.overrides())
    {
        println!("{event_id}");
    }
    Ok(())
}

/// Task file first, then every flag that was given on top of it.
pub fn build_task(args: &SendArgs) -> Result<NotifyTask, NotifierError> {
    let mut task = match args.task {
        Some(ref path) => NotifyTask::load(path)?,
        None => NotifyTask::default(),
    };

    if let Some(ref message) = args.message {
        task.message.clone_from(message);
    }
    if let Some(level) = args.level {
        task.level = level;
    }
    task.tags.extend(args.tags.iter().cloned());
    task.extra.extend(args.extra.iter().cloned());
    if !args.fingerprint.is_empty() {
        task.fingerprint.clone_from(&args.fingerprint);
    }
    if args.culprit.is_some() {
        task.culprit.clone_from(&args.culprit);
    }
    if args.time_spent.is_some() {
        task.time_spent = args.time_spent;
    }
    if args.client.environment.is_some() {
        task.environment.clone_from(&args.client.environment);
    }

    Ok(task)
}
