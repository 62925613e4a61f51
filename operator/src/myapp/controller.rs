use std::{path::PathBuf, sync::Arc, time::Duration};

use futures::stream::StreamExt;
use kube::{
    core::object::HasSpec,
    runtime::{controller::Action, watcher::Config, Controller},
    Api, ResourceExt,
};
use opentelemetry::{global, KeyValue};
use tracing::{debug, error, info, warn};

use crate::{
    myapp::{stateful_set::stateful_set_spec, MyApp},
    utils::{create_stateful_set, kube_client, Context},
};

/// Options for running the controller.
#[derive(clap::Args, Debug)]
pub struct Opts {
    /// Kubeconfig used when the operator is not running inside a cluster.
    ///
    /// Without it the `KUBECONFIG` paths are merged, or `~/.kube/config` is read.
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,
}

/// Handle errors during reconciliation.
fn on_error(my_app: Arc<MyApp>, error: &Error, _context: Arc<Context>) -> Action {
    warn!(name = my_app.name_any(), %error, "reconcile failed, requeueing");
    Action::requeue(Duration::from_secs(5))
}

/// Errors produced by the reconcile function.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Kube error: {source}")]
    Kube {
        #[from]
        source: kube::Error,
    },
}

/// Start a controller for the MyApp CRD.
pub async fn run(opts: Opts) -> anyhow::Result<()> {
    let k_client = kube_client(opts.kubeconfig.as_deref()).await?;
    let context = Arc::new(Context::new(k_client));

    drive(controller(&context).shutdown_on_signal(), context).await;
    info!("controller stopped");
    Ok(())
}

fn controller(cx: &Context) -> Controller<MyApp> {
    let my_apps: Api<MyApp> = Api::all(cx.k_client.clone());
    Controller::new(my_apps, Config::default())
}

/// Reconcile until the controller is shut down.
async fn drive(controller: Controller<MyApp>, cx: Arc<Context>) {
    controller
        .run(reconcile, on_error, cx)
        .for_each(|rec_res| async move {
            match rec_res {
                Ok((my_app, _)) => {
                    info!(my_app.name, "reconcile success");
                }
                Err(err) => {
                    error!(?err, "reconcile error")
                }
            }
        })
        .await;
}

/// Perform a reconcile pass for the MyApp CRD
async fn reconcile(my_app: Arc<MyApp>, cx: Arc<Context>) -> Result<Action, Error> {
    let meter = global::meter("myapp");
    let runs = meter
        .u64_counter("myapp_reconcile_count")
        .with_description("Number of MyApp reconciles")
        .init();

    match reconcile_(my_app, cx).await {
        Ok(action) => {
            runs.add(1, &[KeyValue::new("result", "ok")]);
            Ok(action)
        }
        Err(err) => {
            runs.add(1, &[KeyValue::new("result", "err")]);
            Err(err)
        }
    }
}

async fn reconcile_(my_app: Arc<MyApp>, cx: Arc<Context>) -> Result<Action, Error> {
    let spec = my_app.spec();
    info!(
        name = my_app.name_any(),
        namespace = my_app.namespace(),
        msg = spec.message,
        "received MyApp"
    );

    if !spec.wants_stateful_set() {
        debug!(msg = spec.message, "message does not request a stateful set");
        return Ok(Action::await_change());
    }

    let config = &cx.stateful_set;
    info!(
        name = config.name,
        namespace = config.namespace,
        "message is create, creating stateful set"
    );
    let created = create_stateful_set(
        cx.clone(),
        &config.namespace,
        &config.name,
        stateful_set_spec(config),
    )
    .await?;
    match created {
        Some(stateful_set) => info!(name = stateful_set.name_any(), "created stateful set"),
        None => debug!(name = config.name, "stateful set already exists"),
    }

    // Nothing is tracked after creation, only changes to the MyApp trigger another pass.
    Ok(Action::await_change())
}
