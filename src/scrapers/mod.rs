//! News page scrapers.
//!
//! Only one source is watched, the Lodestone news feed. Scraping follows the
//! same two-phase pattern regardless of source:
//!
//! 1. **Scanning**: find the relevant article link on a listing page
//! 2. **Inspecting**: fetch that article and read what it says
//!
//! | Source | Module | Listing selector | Detail selector |
//! |--------|--------|------------------|-----------------|
//! | Lodestone | [`lodestone`] | `.news__content > ul` | `.news__detail__wrapper` |

pub mod lodestone;
