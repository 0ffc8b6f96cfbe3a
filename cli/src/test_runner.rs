//! `mdtags test`: render every `*.test.toml` fixture and compare the result
//! with its `expect_output` or `expect_error` key.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use colored::Colorize;
use serde::Deserialize;
use walkdir::WalkDir;

use mdtags::Renderer;

use crate::document::{self, Overrides};

const FIXTURE_SUFFIX: &str = ".test.toml";

/// Expectations read from a fixture, next to its document keys.
#[derive(Debug, Deserialize)]
pub struct TestConfig {
    #[serde(default)]
    pub description: Option<String>,

    /// Expected markdown, compared after trimming both sides.
    #[serde(default)]
    pub expect_output: Option<String>,

    /// Substring the rejection message must contain.
    #[serde(default)]
    pub expect_error: Option<String>,
}

impl TestConfig {
    fn judge(&self, rendered: Result<String, String>) -> Result<(), String> {
        match (&self.expect_error, rendered) {
            (Some(wanted), Err(actual)) if actual.contains(wanted.as_str()) => Ok(()),
            (Some(wanted), Err(actual)) => Err(format!(
                "expected error containing \"{}\", got: {}",
                wanted, actual
            )),
            (Some(wanted), Ok(_)) => Err(format!(
                "expected error containing \"{}\", but rendering succeeded",
                wanted
            )),
            (None, Err(actual)) => Err(format!("unexpected error: {}", actual)),
            (None, Ok(actual)) => match self.expect_output.as_deref().map(str::trim) {
                Some(wanted) if wanted != actual.trim() => Err(format!(
                    "output mismatch\n  expected: {:?}\n  actual:   {:?}",
                    wanted,
                    actual.trim()
                )),
                _ => Ok(()),
            },
        }
    }
}

/// One fixture after it ran.
struct FixtureRun {
    path: PathBuf,
    description: Option<String>,
    verdict: Result<(), String>,
}

impl FixtureRun {
    fn execute(path: &Path) -> FixtureRun {
        let (description, verdict) = match std::fs::read_to_string(path) {
            Err(e) => (None, Err(format!("cannot read file: {}", e))),
            Ok(source) => match toml::from_str::<TestConfig>(&source) {
                Err(e) => (None, Err(format!("TOML parse error: {}", e.message()))),
                Ok(config) => {
                    let verdict = config.judge(render_fixture(&source));
                    (config.description, verdict)
                }
            },
        };
        FixtureRun {
            path: path.to_path_buf(),
            description,
            verdict,
        }
    }

    fn name(&self) -> &str {
        self.description.as_deref().unwrap_or_else(|| {
            self.path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| name.strip_suffix(FIXTURE_SUFFIX))
                .unwrap_or("?")
        })
    }
}

/// Fixtures render with every reddit extension available, using the
/// dialect and recover keys from the file itself.
fn render_fixture(source: &str) -> Result<String, String> {
    let registry = mdtags_reddit::registry();
    let loaded = document::load(source, &Overrides::default()).map_err(|e| e.to_string())?;
    Renderer::new(&registry)
        .render(&loaded.document, loaded.options)
        .map_err(|e| e.to_string())
}

/// Fixture files grouped by the folder holding them, relative to the root.
/// Files directly under the root form the group named "".
struct Suite {
    groups: BTreeMap<String, Vec<PathBuf>>,
}

impl Suite {
    fn open(path: &Path) -> Suite {
        if path.is_file() {
            return Suite {
                groups: BTreeMap::from([(String::new(), vec![path.to_path_buf()])]),
            };
        }

        let mut groups: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
        let fixtures = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(FIXTURE_SUFFIX));
        for entry in fixtures {
            let group = entry
                .path()
                .parent()
                .and_then(|parent| parent.strip_prefix(path).ok())
                .map(|parent| parent.to_string_lossy().replace('\\', "/"))
                .unwrap_or_default();
            groups.entry(group).or_default().push(entry.into_path());
        }
        log::debug!("found {} fixture groups under {}", groups.len(), path.display());
        Suite { groups }
    }

    /// Groups named by `requested`, each also selecting its subfolders;
    /// everything when nothing is requested.
    fn select(&self, requested: &[String]) -> BTreeMap<&str, &[PathBuf]> {
        let mut selected = BTreeMap::new();
        for (group, files) in &self.groups {
            let wanted = requested.is_empty()
                || requested.iter().any(|name| {
                    let name = name.trim_matches('/');
                    group == name
                        || group
                            .strip_prefix(name)
                            .is_some_and(|rest| rest.starts_with('/'))
                });
            if wanted {
                selected.insert(group.as_str(), files.as_slice());
            }
        }
        for name in requested {
            let name = name.trim_matches('/');
            if !selected
                .keys()
                .any(|group| *group == name || group.starts_with(&format!("{}/", name)))
            {
                let known: Vec<&str> = self.groups.keys().map(|g| group_title(g)).collect();
                eprintln!(
                    "warning: category '{}' not found (available: {})",
                    name,
                    known.join(", ")
                );
            }
        }
        selected
    }
}

fn group_title(group: &str) -> &str {
    if group.is_empty() { "(root)" } else { group }
}

/// Running totals, printed once every selected fixture has run.
#[derive(Default)]
struct Tally {
    passed: usize,
    failed: Vec<FixtureRun>,
}

impl Tally {
    fn record(&mut self, run: FixtureRun) {
        match run.verdict {
            Ok(()) => {
                eprintln!("  {}  {}", "PASS".green(), run.name());
                self.passed += 1;
            }
            Err(_) => {
                eprintln!("  {}  {}", "FAIL".red(), run.name());
                self.failed.push(run);
            }
        }
    }

    /// Print failure details and the summary line; returns the exit code.
    fn finish(self) -> i32 {
        if !self.failed.is_empty() {
            eprintln!();
            eprintln!("failures:");
        }
        for run in &self.failed {
            eprintln!();
            eprintln!("  --- {} ---", run.path.display());
            if let Err(reason) = &run.verdict {
                for line in reason.lines() {
                    eprintln!("  {}", line);
                }
            }
        }

        eprintln!();
        if self.failed.is_empty() {
            eprintln!("test result: {}. {} passed, 0 failed", "ok".green(), self.passed);
            0
        } else {
            eprintln!(
                "test result: {}. {} passed, {} failed (of {})",
                "FAILED".red(),
                self.passed,
                self.failed.len(),
                self.passed + self.failed.len()
            );
            1
        }
    }
}

/// Print the fixture groups under `path` with their sizes.
pub fn list_categories(path: &Path) {
    if path.is_file() {
        eprintln!("(single file, no categories)");
        return;
    }
    let suite = Suite::open(path);
    if suite.groups.is_empty() {
        eprintln!("no {} files found in {}", FIXTURE_SUFFIX, path.display());
        return;
    }
    eprintln!("available categories:");
    for (group, files) in &suite.groups {
        eprintln!("  {} ({} tests)", group_title(group), files.len());
    }
}

/// Run the fixtures under `path` (a folder or a single file), limited to
/// `categories` when any are given. Returns the process exit code.
pub fn run_tests(path: &Path, no_color: bool, categories: &[String]) -> i32 {
    if no_color {
        colored::control::set_override(false);
    }

    let suite = Suite::open(path);
    if suite.groups.is_empty() {
        eprintln!("no {} files found in {}", FIXTURE_SUFFIX, path.display());
        return 1;
    }

    let categories: &[String] = if path.is_file() { &[] } else { categories };
    let selected = suite.select(categories);
    if selected.is_empty() {
        eprintln!("no matching categories found");
        return 1;
    }

    let mut tally = Tally::default();
    for (group, files) in selected {
        eprintln!();
        eprintln!("{}", group_title(group).bold());
        for file in files {
            tally.record(FixtureRun::execute(file));
        }
    }
    tally.finish()
}
