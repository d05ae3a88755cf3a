use std::future::Future;
use std::time::Duration;
use derive_more::{Constructor, Display};
use crate::catalog::CatalogSource;
use crate::domain::AllowList;
use crate::filter::filter_new;
use crate::notifier::{MessageSender, Notifier};
use crate::repo::StateStore;

#[derive(Debug, Default, Copy, Clone, PartialEq, Display)]
#[display("{fetched} fetched, {new} new, {sent} sent, {failed} failed")]
pub struct RunSummary {
    pub fetched: usize,
    pub new: usize,
    pub sent: usize,
    pub failed: usize,
}

#[derive(Constructor)]
pub struct Job<C: CatalogSource, S: MessageSender> {
    catalog: C,
    notifier: Notifier<S>,
    store: StateStore,
    allow_list: AllowList,
}

impl <C: CatalogSource, S: MessageSender> Job<C, S> {

    /// A fetch failure aborts the run before the state is touched. The state file is rewritten
    /// only if at least one message was sent.
    pub async fn run_once(&self) -> anyhow::Result<RunSummary> {
        let mut state = self.store.load();

        let entries = self.catalog.fetch().await?;
        log::info!("the catalog returned {} active giveaway(s)", entries.len());

        let new_entries = filter_new(&entries, &self.allow_list, &state);
        let mut summary = RunSummary {
            fetched: entries.len(),
            new: new_entries.len(),
            ..Default::default()
        };
        if new_entries.is_empty() {
            log::info!("no new giveaways to report");
            return Ok(summary)
        }
        log::info!("found {} new giveaway(s) to report", new_entries.len());

        let report = self.notifier.announce(&new_entries, &mut state).await;
        summary.sent = report.sent;
        summary.failed = report.failed;

        if report.sent == 0 {
            log::warn!("no messages were sent successfully");
            return Ok(summary)
        }
        self.store.save(&state)?;
        Ok(summary)
    }

    /// Runs until Ctrl+C is pressed. Errors of individual runs are logged only.
    pub async fn run_forever(&self, interval: Duration) {
        // spawned right away, so that the handler is installed before the first run starts
        let ctrl_c = tokio::spawn(tokio::signal::ctrl_c());
        let shutdown = async move {
            match ctrl_c.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => log::error!("couldn't listen for the shutdown signal: {e}"),
                Err(e) => log::error!("the shutdown signal listener failed: {e}"),
            }
        };
        self.run_until(interval, shutdown).await
    }

    /// Repeats the run with a fixed pause until `shutdown` completes. A run which is in progress
    /// when it happens is finished first, so the state is always saved.
    pub async fn run_until(&self, interval: Duration, shutdown: impl Future<Output = ()>) {
        log::info!("running every {} second(s), the state is kept in {}", interval.as_secs(), self.store.path().display());
        tokio::pin!(shutdown);
        loop {
            match self.run_once().await {
                Ok(summary) => log::info!("run finished: {summary}"),
                Err(e) => log::error!("run failed: {e:#}"),
            }

            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = &mut shutdown => {
                    log::info!("shutting down");
                    break
                }
            }
        }
    }
}
