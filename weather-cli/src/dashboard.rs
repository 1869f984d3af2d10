//! Interactive dashboard: stdin lines are searches, the clock keeps ticking.
//!
//! The screen is redrawn when a fetch starts (Loading), when it settles, on a
//! blank line, and when the day/night background flips. The clock line shows
//! the time of the latest redraw.

use std::{future::Future, io::Write, sync::Arc, time::Duration};

use chrono::Timelike;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader},
    task::JoinSet,
};
use tracing::{debug, info, warn};
use weather_core::{
    Clock, DashboardView, FetchOutcome, Phase, QueryController, SubmitOutcome,
    presentation::is_night,
};

use crate::render::render;

const PROMPT: &str = "Search city (:q to quit)> ";

pub async fn run(controller: Arc<QueryController>, tick: Duration) -> anyhow::Result<()> {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "Ctrl-C handler unavailable");
        }
    };
    let mut stdout = std::io::stdout();

    run_with(controller, tick, BufReader::new(tokio::io::stdin()), &mut stdout, ctrl_c).await
}

/// Dashboard loop over any line source and output sink. Returns on `:q`,
/// end of input, or when `shutdown` resolves.
pub async fn run_with<R, W, S>(
    controller: Arc<QueryController>,
    tick: Duration,
    input: R,
    out: &mut W,
    shutdown: S,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    S: Future<Output = ()>,
{
    let mut clock = Clock::start(tick);
    let mut night = is_night(clock.now().hour());
    let mut lines = input.lines();
    let mut phases = controller.subscribe_phase();
    // `None` marks a blank submission.
    let mut fetches: JoinSet<Option<FetchOutcome>> = JoinSet::new();

    tokio::pin!(shutdown);

    fetches.spawn({
        let controller = Arc::clone(&controller);
        async move { Some(controller.load_initial().await) }
    });

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim() == ":q" {
                    break;
                }

                controller.set_search_text(line);
                fetches.spawn({
                    let controller = Arc::clone(&controller);
                    async move {
                        match controller.submit().await {
                            SubmitOutcome::Fetched(outcome) => Some(outcome),
                            SubmitOutcome::Ignored => None,
                        }
                    }
                });
            }
            Ok(()) = phases.changed() => {
                let phase = *phases.borrow_and_update();
                if phase == Phase::Loading {
                    draw(out, &controller, &clock)?;
                }
            }
            Some(joined) = fetches.join_next() => {
                match joined {
                    Ok(Some(FetchOutcome::Superseded)) => debug!("Skipping redraw for stale result"),
                    // Settled fetches, blank lines and a blank start city all redraw.
                    Ok(_) => draw(out, &controller, &clock)?,
                    Err(err) => warn!(error = %err, "Fetch task failed"),
                }
            }
            Some(now) = clock.changed() => {
                let now_night = is_night(now.hour());
                if now_night != night {
                    info!(night = now_night, "Day/night background switched");
                    night = now_night;
                    draw(out, &controller, &clock)?;
                }
            }
            () = &mut shutdown => break,
        }
    }

    fetches.abort_all();
    clock.stop();
    Ok(())
}

fn draw<W: Write>(out: &mut W, controller: &QueryController, clock: &Clock) -> std::io::Result<()> {
    let view = DashboardView::build(&controller.snapshot_state(), &clock.now());
    write!(out, "{}{PROMPT}", render(&view))?;
    out.flush()
}
