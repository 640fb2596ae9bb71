//! One pass of the watch: scan the listing, inspect the article, notify.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetch::{PageSource, fetch_document};
use crate::models::Status;
use crate::notify::{Notifier, resolved_message};
use crate::scrapers::lodestone::{self, CONGESTION_KEYWORD};
use crate::utils::title_case;
use tracing::{info, instrument};

/// Run the pipeline once.
///
/// Fetches the listing at `config.url`, picks the first congestion notice,
/// and checks whether it still lists the marker world. If it does, logs and
/// returns [`Status::Congested`]; otherwise sends the resolved message and
/// returns [`Status::Notified`]. Every failure is returned unhandled.
#[instrument(level = "info", skip_all, fields(url = %config.url, world = %config.world))]
pub async fn run_once<S, N>(config: &Config, source: &S, notifier: &N) -> Result<Status>
where
    S: PageSource,
    N: Notifier,
{
    let link = {
        let listing = fetch_document(source, &config.url).await?;
        lodestone::find_candidate_link(&listing, CONGESTION_KEYWORD)
    };
    let link = match link {
        None => return Err(Error::NotFound),
        Some(link) if link.is_empty() => return Err(Error::UnusableLink),
        Some(link) => link,
    };

    let article_url = lodestone::resolve(&config.url, &link)?;
    info!(%article_url, "Located congestion article");

    let congested = lodestone::is_congested(
        source,
        &article_url,
        &config.world,
        config.marker_world.as_deref(),
    )
    .await?;

    if congested {
        info!("{} is congested", title_case(&config.world));
        return Ok(Status::Congested);
    }

    notifier
        .notify(&config.recipient, &resolved_message(&config.world))
        .await?;
    Ok(Status::Notified)
}
