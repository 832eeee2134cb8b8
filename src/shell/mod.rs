//! Interactive exploration session.
//!
//! Each pass asks for a city and filters, prints every statistic group,
//! optionally pages through raw rows, then offers to start over. A restart
//! is simply the next loop iteration with a fresh load.

mod prompt;

pub use prompt::Prompter;

use std::io::{BufRead, Write};
use std::time::Instant;

use anyhow::Result;
use bikeshare_explorer::output::{
    RULE, render_duration, render_rows, render_stations, render_time, render_users,
};
use bikeshare_explorer::stats::{duration_stats, station_stats, time_stats, user_stats};
use bikeshare_explorer::{
    Catalog, City, Day, FilteredView, Month, NormalizedDataset, Selection, Selector, filter,
    normalize,
};
use tracing::{info, warn};

/// Runs passes until the user declines to restart or input runs out.
pub fn run<R: BufRead, W: Write>(
    catalog: &Catalog,
    page_size: usize,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    loop {
        prompter.say("Hello! Let's explore some US bikeshare data!")?;

        let Some((city, selection)) = ask_filters(prompter)? else {
            return Ok(());
        };

        // Dataset failures end the pass; prompt I/O failures end the session.
        match load_dataset(catalog, city) {
            Ok(dataset) => explore_once(&dataset, city, &selection, page_size, prompter)?,
            Err(e) => {
                warn!(error = %e, city = %city, "Exploration pass failed");
                prompter.say(&format!("\nCould not explore {city}: {e}"))?;
            }
        }

        if !prompter.confirm("\nWould you like to restart? Enter yes or no.")? {
            info!("Session finished");
            return Ok(());
        }
    }
}

fn ask_filters<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<Option<(City, Selection)>> {
    let Some(city) = prompter
        .choose::<City>("Would you like to see data for Chicago, New York or Washington?")?
    else {
        return Ok(None);
    };
    let Some(month) = prompter.choose::<Selector<Month>>(
        "Which month? all, January, February, March, April, May, or June?",
    )?
    else {
        return Ok(None);
    };
    let Some(day) = prompter.choose::<Selector<Day>>(
        "Which day? all, or a weekday such as Monday, Tuesday, ... Sunday?",
    )?
    else {
        return Ok(None);
    };

    prompter.say(RULE)?;
    Ok(Some((city, Selection::new(month, day))))
}

#[tracing::instrument(skip(catalog))]
fn load_dataset(catalog: &Catalog, city: City) -> bikeshare_explorer::Result<NormalizedDataset> {
    let raw = catalog.load(city)?;
    normalize(&raw)
}

#[tracing::instrument(
    skip_all,
    fields(city = %city, month = %selection.month, day = %selection.day)
)]
fn explore_once<R: BufRead, W: Write>(
    dataset: &NormalizedDataset,
    city: City,
    selection: &Selection,
    page_size: usize,
    prompter: &mut Prompter<R, W>,
) -> std::io::Result<()> {
    let view = filter(dataset, selection);

    prompter.say(&format!(
        "\n{city}: {} trips match month={} day={}",
        view.len(),
        selection.month,
        selection.day
    ))?;

    timed(prompter, || render_time(&time_stats(&view)))?;
    timed(prompter, || render_stations(&station_stats(&view)))?;
    timed(prompter, || render_duration(&duration_stats(&view)))?;
    timed(prompter, || render_users(&user_stats(&view)))?;

    page_rows(&view, page_size, prompter)
}

fn timed<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    section: impl FnOnce() -> String,
) -> std::io::Result<()> {
    let start = Instant::now();
    let text = section();
    let elapsed = start.elapsed();

    prompter.say(&format!("\n{text}"))?;
    prompter.say(&format!("This took {:.6} seconds.", elapsed.as_secs_f64()))?;
    prompter.say(RULE)
}

fn page_rows<R: BufRead, W: Write>(
    view: &FilteredView<'_>,
    page_size: usize,
    prompter: &mut Prompter<R, W>,
) -> std::io::Result<()> {
    let mut start = 0;
    let mut question =
        format!("\nDo you want to see the first {page_size} rows of data? Enter yes or no.");

    while start < view.len() && prompter.confirm(&question)? {
        prompter.say(&render_rows(view.schema(), view.page(start, page_size)))?;
        start += page_size;
        question = format!("Do you want to see the next {page_size} rows? Enter yes or no.");
    }
    Ok(())
}
