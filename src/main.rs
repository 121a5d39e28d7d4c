use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;

use proofread::cli::{CliArgs, InputSource, OutputMode};
use proofread::config::ProofreadConfig;
use proofread::correction::{apply_corrections, CorrectionClient};
use proofread::messages::{CorrectionMsg, Msg};
use proofread::model::AppModel;
use proofread::runtime::Runtime;

/// Slack on top of the HTTP timeout before giving up on the worker
const WAIT_GRACE_SECS: u64 = 5;
/// Upper bound on waiting when the HTTP timeout is disabled
const UNBOUNDED_WAIT_SECS: u64 = 24 * 60 * 60;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    proofread::tracing::init();

    let run = args
        .into_config(ProofreadConfig::load())
        .map_err(anyhow::Error::msg)?;

    let text = match run.input {
        InputSource::Text(text) => text,
        InputSource::Stdin => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading text from stdin")?;
            buf.trim_end_matches(&['\r', '\n'][..]).to_string()
        }
    };
    if text.trim().is_empty() {
        bail!("nothing to check");
    }

    let timeout_secs = run.config.service.timeout_secs;
    let client = CorrectionClient::new(run.config.service.clone())?;
    tracing::info!(url = client.url(), model = %client.settings().model, "checking text");

    let model = AppModel::with_content(text, run.config.surface_props());
    let mut runtime = Runtime::new(model, Arc::new(client));
    runtime.dispatch(Msg::Correction(CorrectionMsg::Check));

    let wait = if timeout_secs == 0 {
        Duration::from_secs(UNBOUNDED_WAIT_SECS)
    } else {
        Duration::from_secs(timeout_secs + WAIT_GRACE_SECS)
    };
    if !runtime.wait_idle(wait) {
        bail!("timed out waiting for the correction service");
    }

    let model = runtime.into_model();
    if let Some(error) = &model.correction.last_error {
        bail!("correction failed: {}", error);
    }

    let output = match run.output {
        OutputMode::Content => model.content(),
        OutputMode::Applied => apply_corrections(&model.content()),
        OutputMode::Html => model.field.surface().render_html(),
    };
    println!("{}", output);
    Ok(())
}
