//! Interactive menu and the operations behind each subcommand.

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::warn;

use serieswatch_core::{
    notify_updates, LoadOutcome, Notifier, ShowCatalog, ShowRecord, ShowStore, ShowSummary,
    UpdateChecker, UpdateReport, UpsertOutcome,
};

use crate::render;

const SAVED_MESSAGE: &str = "Saved the show in the database.";
const ALREADY_SAVED_MESSAGE: &str = "Uh oh. Looks like you've already saved this show before.";
const NO_RESULTS_MESSAGE: &str =
    "Your search term did not result in any results, please try again!";

/// Everything the tracker needs, injected once at startup.
pub struct App {
    catalog: Arc<dyn ShowCatalog>,
    store: Arc<dyn ShowStore>,
    checker: UpdateChecker,
    notifier: Arc<dyn Notifier>,
    search_limit: usize,
    notify_interval: Duration,
}

impl App {
    pub fn new(
        catalog: Arc<dyn ShowCatalog>,
        store: Arc<dyn ShowStore>,
        checker: UpdateChecker,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            catalog,
            store,
            checker,
            notifier,
            search_limit: 8,
            notify_interval: Duration::ZERO,
        }
    }

    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    pub fn with_notify_interval(mut self, interval: Duration) -> Self {
        self.notify_interval = interval;
        self
    }

    /// Search the catalog, keeping at most `search_limit` results.
    pub async fn search(&self, term: &str) -> Result<Vec<ShowSummary>> {
        let mut results = self
            .catalog
            .search_tv(term)
            .await
            .with_context(|| format!("Search for '{}' failed", term))?;
        results.truncate(self.search_limit);
        Ok(results)
    }

    /// Fetch a show's current details and save it if not already saved.
    pub async fn save_show(&self, show_id: u32) -> Result<(ShowRecord, UpsertOutcome)> {
        let details = self
            .catalog
            .get_tv(show_id)
            .await
            .with_context(|| format!("Failed to fetch details for show {}", show_id))?;

        let record = ShowRecord::new(details.name, details.number_of_seasons, details.id);
        let outcome = self
            .store
            .upsert(&record)
            .context("Failed to save show")?;

        Ok((record, outcome))
    }

    pub fn saved_shows(&self) -> Result<LoadOutcome> {
        self.store.load_all().context("Failed to read saved shows")
    }

    /// Check for new seasons, persist them and notify.
    pub async fn check_updates(&self) -> Result<UpdateReport> {
        let report = self
            .checker
            .check_for_updates()
            .await
            .context("Update check failed")?;

        if !report.no_data {
            notify_updates(self.notifier.as_ref(), &report.deltas, self.notify_interval).await;
        }

        Ok(report)
    }
}

/// Prompt-driven front end over an [`App`].
pub struct Menu<'a, R, W> {
    app: &'a App,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(app: &'a App, input: R, out: W) -> Self {
        Self { app, input, out }
    }

    /// Run the main menu until the user quits or input ends.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.out, "Hello, what would you like to do?")?;
            writeln!(self.out, "Input 1 to enter a TV show into the local database.")?;
            writeln!(self.out, "Input 2 to view the shows stored in the local database.")?;
            writeln!(self.out, "Input 3 to check for show updates.")?;

            let Some(choice) = self.prompt("Else, input 0 to quit the program: ")? else {
                return Ok(());
            };

            let result = match choice.trim() {
                "1" => self.save_flow().await,
                "2" => self.list(),
                "3" => self.check().await,
                "0" => return Ok(()),
                _ => {
                    writeln!(self.out, "Please enter 0, 1, 2 or 3.")?;
                    Ok(())
                }
            };

            if let Err(e) = result {
                warn!("Operation failed: {:#}", e);
                writeln!(self.out, "Error: {:#}", e)?;
            }
            writeln!(self.out)?;
        }
    }

    /// Search, let the user pick a result and save it.
    async fn save_flow(&mut self) -> Result<()> {
        loop {
            writeln!(self.out)?;
            let Some(term) = self.prompt("Enter the TV show to look for, or 0 to go back: ")?
            else {
                return Ok(());
            };
            let term = term.trim();

            if term == "0" {
                return Ok(());
            }
            if term.is_empty() {
                continue;
            }

            let results = self.app.search(term).await?;
            if results.is_empty() {
                writeln!(self.out, "{}", NO_RESULTS_MESSAGE)?;
                continue;
            }

            write!(self.out, "{}", render::search_results(&results))?;
            writeln!(
                self.out,
                "Input a number to select the show of your choice. \
                 Your choice will then be saved in the local database."
            )?;

            return match self.pick(results.len())? {
                Some(index) => self.add(results[index].id).await,
                None => Ok(()),
            };
        }
    }

    /// Ask for 1..=count; `None` means go back.
    fn pick(&mut self, count: usize) -> Result<Option<usize>> {
        let message = if count > 1 {
            format!(
                "Enter a number between 1 and {} or 0 if you want to go back: ",
                count
            )
        } else {
            "Enter 1 if you want to select the show or 0 if you want to go back: ".to_string()
        };

        loop {
            let Some(answer) = self.prompt(&message)? else {
                return Ok(None);
            };

            match answer.trim().parse::<usize>() {
                Ok(0) => return Ok(None),
                Ok(n) if n <= count => return Ok(Some(n - 1)),
                _ => continue,
            }
        }
    }

    /// Print search results for `term`.
    pub async fn search(&mut self, term: &str) -> Result<()> {
        let results = self.app.search(term).await?;
        if results.is_empty() {
            writeln!(self.out, "No results for '{}'.", term)?;
        } else {
            write!(self.out, "{}", render::search_results_with_ids(&results))?;
        }
        Ok(())
    }

    /// Save the show with the given catalog ID.
    pub async fn add(&mut self, show_id: u32) -> Result<()> {
        let (record, outcome) = self.app.save_show(show_id).await?;
        writeln!(self.out)?;
        match outcome {
            UpsertOutcome::Saved => writeln!(
                self.out,
                "{} ({} season(s))\n{}",
                record.name, record.season_count, SAVED_MESSAGE
            )?,
            UpsertOutcome::AlreadyExists => writeln!(self.out, "{}", ALREADY_SAVED_MESSAGE)?,
        }
        Ok(())
    }

    /// Print the saved-show table.
    pub fn list(&mut self) -> Result<()> {
        match self.app.saved_shows()? {
            LoadOutcome::NoData => writeln!(self.out, "{}", render::NO_DATA_MESSAGE)?,
            LoadOutcome::Loaded { records, .. } => {
                write!(self.out, "{}", render::show_table(&records))?
            }
        }
        Ok(())
    }

    /// Run an update check and print its summary.
    pub async fn check(&mut self) -> Result<()> {
        let report = self.app.check_updates().await?;
        write!(self.out, "{}", render::update_summary(&report))?;
        Ok(())
    }

    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.out, "{}", message)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serieswatch_core::testing::{fixtures, MockNotifier, MockShowCatalog};
    use serieswatch_core::CsvShowStore;
    use std::io::Cursor;
    use tempfile::TempDir;

    struct Harness {
        catalog: Arc<MockShowCatalog>,
        store: Arc<CsvShowStore>,
        notifier: Arc<MockNotifier>,
        app: App,
        _dir: TempDir,
    }

    impl Harness {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let catalog = Arc::new(MockShowCatalog::new());
            let store = Arc::new(CsvShowStore::open(dir.path().join("shows.csv")).unwrap());
            let notifier = Arc::new(MockNotifier::new());
            let checker = UpdateChecker::new(catalog.clone(), store.clone());
            let app = App::new(catalog.clone(), store.clone(), checker, notifier.clone());

            Self {
                catalog,
                store,
                notifier,
                app,
                _dir: dir,
            }
        }

        async fn run(&self, input: &str) -> String {
            let mut out = Vec::new();
            Menu::new(&self.app, Cursor::new(input.as_bytes()), &mut out)
                .run()
                .await
                .unwrap();
            String::from_utf8(out).unwrap()
        }
    }

    #[tokio::test]
    async fn test_quit_immediately() {
        let h = Harness::new();
        let out = h.run("0\n").await;
        assert!(out.contains("Hello, what would you like to do?"));
        assert_eq!(h.catalog.query_count().await, 0);
    }

    #[tokio::test]
    async fn test_end_of_input_quits() {
        let h = Harness::new();
        let out = h.run("").await;
        assert!(out.contains("Else, input 0 to quit the program: "));
    }

    #[tokio::test]
    async fn test_invalid_choice_reprompts() {
        let h = Harness::new();
        let out = h.run("banana\n0\n").await;
        assert!(out.contains("Please enter 0, 1, 2 or 3."));
        assert_eq!(out.matches("Hello, what would you like to do?").count(), 2);
    }

    #[tokio::test]
    async fn test_view_empty_store() {
        let h = Harness::new();
        let out = h.run("2\n0\n").await;
        assert!(out.contains(render::NO_DATA_MESSAGE));
    }

    #[tokio::test]
    async fn test_search_select_and_save() {
        let h = Harness::new();
        h.catalog.add_series(fixtures::show_details(1396, "Breaking Bad", 5)).await;

        let out = h.run("1\nbreaking\n1\n0\n").await;
        assert!(out.contains("1. Breaking Bad, 2020, -"));
        assert!(out.contains("Enter 1 if you want to select the show"));
        assert!(out.contains(SAVED_MESSAGE));

        let records = h.store.load_all().unwrap().into_records();
        assert_eq!(records, vec![fixtures::record("Breaking Bad", 5, 1396)]);
    }

    #[tokio::test]
    async fn test_saving_twice_reports_already_saved() {
        let h = Harness::new();
        h.catalog.add_series(fixtures::show_details(1396, "Breaking Bad", 5)).await;

        let out = h.run("1\nbreaking\n1\n1\nbreaking\n1\n0\n").await;
        assert!(out.contains(ALREADY_SAVED_MESSAGE));
        assert_eq!(h.store.load_all().unwrap().records().len(), 1);
    }

    #[tokio::test]
    async fn test_no_results_reprompts_then_back() {
        let h = Harness::new();
        let out = h.run("1\nnothing\n0\n0\n").await;
        assert!(out.contains(NO_RESULTS_MESSAGE));
        assert_eq!(h.store.load_all().unwrap(), LoadOutcome::NoData);
    }

    #[tokio::test]
    async fn test_pick_out_of_range_reprompts_and_zero_goes_back() {
        let h = Harness::new();
        h.catalog.add_series(fixtures::show_details(1, "Dark", 3)).await;
        h.catalog.add_series(fixtures::show_details(2, "Dark Matter", 3)).await;

        let out = h.run("1\ndark\n7\nx\n0\n0\n").await;
        assert_eq!(
            out.matches("Enter a number between 1 and 2 or 0 if you want to go back: ")
                .count(),
            3
        );
        assert_eq!(h.store.load_all().unwrap(), LoadOutcome::NoData);
    }

    #[tokio::test]
    async fn test_search_subcommand_lists_each_show_once() {
        let h = Harness::new();
        h.catalog.add_series(fixtures::show_details(1396, "Breaking Bad", 5)).await;

        let mut out = Vec::new();
        Menu::new(&h.app, Cursor::new(&b""[..]), &mut out)
            .search("breaking")
            .await
            .unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("1. Breaking Bad, 2020, - (id 1396)\n"));
        assert_eq!(out.matches("Breaking Bad").count(), 1);
    }

    #[tokio::test]
    async fn test_search_results_are_limited() {
        let h = Harness::new();
        for id in 1..=12 {
            h.catalog
                .add_series(fixtures::show_details(id, &format!("Show {}", id), 1))
                .await;
        }

        let results = h.app.search("show").await.unwrap();
        assert_eq!(results.len(), 8);
    }

    #[tokio::test]
    async fn test_check_updates_and_view_table() {
        let h = Harness::new();
        h.store.upsert(&fixtures::record("Foo", 2, 101)).unwrap();
        h.catalog.add_series(fixtures::show_details(101, "Foo", 3)).await;

        let out = h.run("3\n2\n0\n").await;
        assert!(out.contains("Foo now has 3 season(s)."));
        assert!(out.contains("| Foo       |       3 |     101 |"));

        let sent = h.notifier.notifications();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].body, "The show Foo has a new season!");
    }

    #[tokio::test]
    async fn test_check_with_no_data_sends_nothing() {
        let h = Harness::new();
        let out = h.run("3\n0\n").await;
        assert!(out.contains(render::NO_DATA_MESSAGE));
        assert!(h.notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_catalog_failure_is_reported_and_loop_continues() {
        let h = Harness::new();
        h.store.upsert(&fixtures::record("Foo", 2, 101)).unwrap();
        h.catalog.fail_show(101).await;

        let out = h.run("3\n0\n").await;
        assert!(out.contains("Error: Update check failed"));
        assert_eq!(out.matches("Hello, what would you like to do?").count(), 2);
        assert!(h.notifier.notifications().is_empty());
    }
}
