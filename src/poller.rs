//! Fixed-interval scheduling of [`run_once`].
//!
//! The first check runs immediately and its failure is only logged. Later
//! checks run every `config.interval`; a failure there ends polling unless
//! `config.keep_polling` is set. Each check finishes before the next tick is
//! armed, so checks never overlap.

use crate::config::Config;
use crate::error::Result;
use crate::fetch::PageSource;
use crate::notify::Notifier;
use crate::pipeline::run_once;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, error, info, instrument};

/// Poll until a scheduled check fails. Only returns with that error.
#[instrument(level = "info", skip_all, fields(interval_secs = config.interval.as_secs()))]
pub async fn run_forever<S, N>(config: &Config, source: &S, notifier: &N) -> Result<()>
where
    S: PageSource,
    N: Notifier,
{
    match run_once(config, source, notifier).await {
        Ok(status) => debug!(?status, "Initial check complete"),
        Err(e) => error!(error = %e, "Initial check failed"),
    }

    let mut ticker = interval_at(Instant::now() + config.interval, config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        match run_once(config, source, notifier).await {
            Ok(status) => debug!(?status, "Scheduled check complete"),
            Err(e) if config.keep_polling => {
                error!(error = %e, "Scheduled check failed; polling continues");
            }
            Err(e) => {
                info!("Stopping after failed check");
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::pipeline::tests::{
        ARTICLE_URL, LISTING_URL, MemoryPages, RecordingNotifier, article_html, config_for,
        listing_html,
    };
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_first_failure_swallowed_second_fatal() {
        let pages = MemoryPages::default().with(LISTING_URL, &listing_html(""));
        let notifier = RecordingNotifier::default();
        let config = config_for(LISTING_URL, "42");

        let started = Instant::now();
        let err = run_forever(&config, &pages, &notifier).await.unwrap_err();

        assert!(matches!(err, Error::NotFound));
        assert_eq!(pages.requests.lock().unwrap().len(), 2);
        assert!(started.elapsed() >= Duration::from_secs(600));
    }

    #[tokio::test(start_paused = true)]
    async fn test_keep_polling_survives_failures() {
        let pages = MemoryPages::default().with(LISTING_URL, &listing_html(""));
        let notifier = RecordingNotifier::default();
        let mut config = config_for(LISTING_URL, "42");
        config.keep_polling = true;

        let outcome = tokio::time::timeout(
            Duration::from_secs(3 * 600 + 300),
            run_forever(&config, &pages, &notifier),
        )
        .await;

        assert!(outcome.is_err(), "polling should still be running");
        // Startup run plus ticks at 600, 1200 and 1800 seconds.
        assert_eq!(pages.requests.lock().unwrap().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolved_notifies_on_every_run() {
        let item = r#"<li><a href="/lodestone/news/1234">Congested Worlds</a></li>"#;
        let pages = MemoryPages::default()
            .with(LISTING_URL, &listing_html(item))
            .with(ARTICLE_URL, &article_html("<p>none</p>"));
        let notifier = RecordingNotifier::default();
        let config = config_for(LISTING_URL, "42");

        let _ = tokio::time::timeout(
            Duration::from_secs(600 + 300),
            run_forever(&config, &pages, &notifier),
        )
        .await;

        // No deduplication across runs.
        assert_eq!(notifier.sent.lock().unwrap().len(), 2);
    }
}
