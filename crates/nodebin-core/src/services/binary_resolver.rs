//! Locates a Node.js executable and checks that it can be debugged.
//!
//! Resolution runs in two phases. [`BinaryResolver::resolve_and_validate`]
//! locates the requested executable and applies the shape check; when the
//! file name is not the Node binary itself (a version-manager or
//! package-manager shim), it validates the canonical `node` on the same
//! search path exactly once through the non-recursive candidate check and
//! borrows its version. The canonical name always passes the shape check,
//! so there is never a second level of fallback.
//!
//! # Caching
//!
//! Only positive results are memoized, keyed by absolute path. A binary that
//! was too old may be upgraded in place, so failures are probed again on the
//! next call. Concurrent calls for the same uncached path may each run the
//! probe; the inserts are idempotent and requests are not coalesced.

use crate::descriptor::BinaryDescriptor;
use crate::error::{ResolveError, ResolveResult};
use crate::ports::{EnvProvider, PathSearcher, ProcessError, ProcessRunner};
use crate::settings::ResolverSettings;
use crate::version::{
    CANONICAL_BINARY_NAME, MIN_SUPPORTED_MAJOR, is_canonical_binary_name, parse_major_version,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Resolves and validates Node.js binaries, remembering known-good paths.
///
/// One cache per instance; dropping the resolver drops the cache.
pub struct BinaryResolver {
    searcher: Arc<dyn PathSearcher>,
    runner: Arc<dyn ProcessRunner>,
    path_variable: String,
    known_good: RwLock<HashMap<PathBuf, BinaryDescriptor>>,
}

impl BinaryResolver {
    /// Create a resolver reading the default `PATH` variable.
    pub fn new(searcher: Arc<dyn PathSearcher>, runner: Arc<dyn ProcessRunner>) -> Self {
        Self::with_settings(searcher, runner, &ResolverSettings::default())
    }

    /// Create a resolver honouring `settings.path_variable`.
    pub fn with_settings(
        searcher: Arc<dyn PathSearcher>,
        runner: Arc<dyn ProcessRunner>,
        settings: &ResolverSettings,
    ) -> Self {
        Self {
            searcher,
            runner,
            path_variable: settings.effective_path_variable().to_string(),
            known_good: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve the canonical `node` executable.
    pub async fn resolve_node(&self, env: &dyn EnvProvider) -> ResolveResult<BinaryDescriptor> {
        self.resolve_and_validate(env, CANONICAL_BINARY_NAME, None)
            .await
    }

    /// Resolve `executable` against `env` and validate it as a debuggable Node.js.
    ///
    /// When `explicit_version` is given the located binary is trusted as-is
    /// and never probed.
    pub async fn resolve_and_validate(
        &self,
        env: &dyn EnvProvider,
        executable: &str,
        explicit_version: Option<u32>,
    ) -> ResolveResult<BinaryDescriptor> {
        let location = self.locate(env, executable)?;

        if let Some(major) = explicit_version {
            debug!(path = %location.display(), major, "Using caller-supplied Node version");
            return Ok(BinaryDescriptor::new(location, Some(major)));
        }

        let looks_like_node = location
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(is_canonical_binary_name);

        if looks_like_node {
            self.validate_candidate(location).await
        } else {
            self.resolve_through_shim(env, location).await
        }
    }

    /// Run `<path> --version` and return its standard output untouched.
    ///
    /// Any failure to run the binary, including a non-zero exit, is reported
    /// as [`ResolveError::BinaryNotFound`] for `path`.
    pub async fn probe_version_text(&self, path: &Path) -> ResolveResult<String> {
        let args = ["--version".to_string()];
        match self.runner.run(path, &args).await {
            Ok(output) => Ok(output.stdout),
            Err(ProcessError::SpawnFailed(reason)) => {
                warn!(path = %path.display(), %reason, "Could not start Node binary");
                Err(ResolveError::not_found(path.display().to_string()))
            }
            Err(err @ ProcessError::NonZeroExit { .. }) => {
                warn!(path = %path.display(), error = %err, "Node version probe failed");
                Err(ResolveError::not_found(path.display().to_string()))
            }
        }
    }

    /// Validate the binary at `location` without any shape check or fallback.
    async fn validate_candidate(&self, location: PathBuf) -> ResolveResult<BinaryDescriptor> {
        if let Some(known) = self.known_good.read().await.get(&location) {
            debug!(path = %location.display(), "Node binary already validated");
            return Ok(known.clone());
        }

        let raw = self.probe_version_text(&location).await?;
        let major = match parse_major_version(&raw) {
            Some(major) if major >= MIN_SUPPORTED_MAJOR => major,
            _ => return Err(ResolveError::out_of_date(&raw, location)),
        };

        debug!(path = %location.display(), major, "Validated Node binary");
        let descriptor = BinaryDescriptor::new(location.clone(), Some(major));
        self.known_good
            .write()
            .await
            .insert(location, descriptor.clone());
        Ok(descriptor)
    }

    /// Accept a shim at `location`, taking the version from the real `node`.
    async fn resolve_through_shim(
        &self,
        env: &dyn EnvProvider,
        location: PathBuf,
    ) -> ResolveResult<BinaryDescriptor> {
        debug!(
            path = %location.display(),
            "Executable is not named like Node, checking the underlying binary"
        );

        let real = match self.locate(env, CANONICAL_BINARY_NAME) {
            Ok(real_location) => self.validate_candidate(real_location).await,
            Err(err) => Err(err),
        };

        match real {
            Ok(real) => Ok(BinaryDescriptor::new(location, real.major_version())),
            Err(err) if err.is_out_of_date() => Err(err),
            Err(err) => {
                warn!(
                    path = %location.display(),
                    error = %err,
                    "No usable Node binary behind shim, assuming it is capable"
                );
                Ok(BinaryDescriptor::new(location, None))
            }
        }
    }

    fn locate(&self, env: &dyn EnvProvider, executable: &str) -> ResolveResult<PathBuf> {
        let candidate = Path::new(executable);
        if candidate.is_absolute() {
            return Ok(candidate.to_path_buf());
        }

        let search_path = env.get(&self.path_variable);
        self.searcher
            .find(executable, search_path.as_deref())
            .ok_or_else(|| ResolveError::not_found(executable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveErrorKind;
    use crate::ports::{EnvVars, MockProcessRunner, ProcessOutput};
    use async_trait::async_trait;
    use std::ffi::OsStr;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Searcher backed by a name -> path table; records every lookup.
    #[derive(Default)]
    struct FakeSearcher {
        entries: HashMap<String, PathBuf>,
        lookups: Mutex<Vec<String>>,
    }

    impl FakeSearcher {
        fn with(mut self, name: &str, path: &str) -> Self {
            self.entries.insert(name.to_string(), PathBuf::from(path));
            self
        }

        fn lookups(&self) -> Vec<String> {
            self.lookups.lock().unwrap().clone()
        }
    }

    impl PathSearcher for FakeSearcher {
        fn find(&self, name: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
            self.lookups.lock().unwrap().push(name.to_string());
            // An empty or missing search path finds nothing.
            search_path.filter(|p| !p.is_empty())?;
            self.entries.get(name).cloned()
        }
    }

    /// Runner returning configurable `--version` output per path.
    /// Paths without an entry fail to spawn.
    #[derive(Default)]
    struct FakeRunner {
        versions: Mutex<HashMap<PathBuf, String>>,
        calls: AtomicUsize,
    }

    impl FakeRunner {
        fn with(self, path: &str, version: &str) -> Self {
            self.set(path, version);
            self
        }

        fn set(&self, path: &str, version: &str) {
            self.versions
                .lock()
                .unwrap()
                .insert(PathBuf::from(path), version.to_string());
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProcessRunner for FakeRunner {
        async fn run(&self, program: &Path, args: &[String]) -> Result<ProcessOutput, ProcessError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(args, ["--version".to_string()]);
            self.versions
                .lock()
                .unwrap()
                .get(program)
                .map(|v| ProcessOutput::success(v.clone()))
                .ok_or_else(|| ProcessError::SpawnFailed("No such file or directory".into()))
        }
    }

    fn env() -> EnvVars {
        EnvVars::new().with_var("PATH", "/usr/local/bin:/usr/bin")
    }

    fn resolver(searcher: &Arc<FakeSearcher>, runner: &Arc<FakeRunner>) -> BinaryResolver {
        BinaryResolver::new(searcher.clone(), runner.clone())
    }

    #[tokio::test]
    async fn test_resolves_node_on_path() {
        let searcher = Arc::new(FakeSearcher::default().with("node", "/usr/bin/node"));
        let runner = Arc::new(FakeRunner::default().with("/usr/bin/node", "v16.13.1\n"));

        let binary = resolver(&searcher, &runner).resolve_node(&env()).await.unwrap();

        assert_eq!(binary, BinaryDescriptor::new("/usr/bin/node", Some(16)));
        assert!(binary.supports_spaces_in_require_path());
    }

    #[tokio::test]
    async fn test_second_resolution_served_from_cache() {
        let searcher = Arc::new(FakeSearcher::default().with("node", "/usr/bin/node"));
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .times(1)
            .returning(|_, _| Ok(ProcessOutput::success("v14.2.0\n")));
        let resolver = BinaryResolver::new(searcher, Arc::new(runner));

        let first = resolver.resolve_node(&env()).await.unwrap();
        let second = resolver.resolve_node(&env()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second.major_version(), Some(14));
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let searcher = Arc::new(FakeSearcher::default().with("node", "/usr/bin/node"));
        let runner = Arc::new(FakeRunner::default().with("/usr/bin/node", "v7.10.0\n"));
        let resolver = resolver(&searcher, &runner);

        let err = resolver.resolve_node(&env()).await.unwrap_err();
        assert_eq!(err.kind(), ResolveErrorKind::OutOfDate);

        runner.set("/usr/bin/node", "v16.0.0\n");
        let binary = resolver.resolve_node(&env()).await.unwrap();

        assert_eq!(binary.major_version(), Some(16));
        assert_eq!(runner.calls(), 2);
    }

    #[tokio::test]
    async fn test_minimum_version_boundary() {
        for (text, expected) in [
            ("v7.10.0\n", None),
            ("v8.0.0\n", Some(8)),
            ("v8", None),
        ] {
            let searcher = Arc::new(FakeSearcher::default().with("node", "/usr/bin/node"));
            let runner = Arc::new(FakeRunner::default().with("/usr/bin/node", text));

            let result = resolver(&searcher, &runner).resolve_node(&env()).await;

            match expected {
                Some(major) => assert_eq!(result.unwrap().major_version(), Some(major)),
                None => assert_eq!(
                    result.unwrap_err(),
                    ResolveError::out_of_date(text, "/usr/bin/node"),
                    "{text:?} should be rejected"
                ),
            }
        }
    }

    #[tokio::test]
    async fn test_explicit_version_skips_probe() {
        let searcher = Arc::new(FakeSearcher::default().with("custom-runtime", "/opt/rt/custom-runtime"));
        let mut runner = MockProcessRunner::new();
        runner.expect_run().times(0);
        let resolver = BinaryResolver::new(searcher, Arc::new(runner));

        let binary = resolver
            .resolve_and_validate(&env(), "custom-runtime", Some(6))
            .await
            .unwrap();

        assert_eq!(binary, BinaryDescriptor::new("/opt/rt/custom-runtime", Some(6)));
        assert!(!binary.supports_spaces_in_require_path());
    }

    #[tokio::test]
    async fn test_explicit_version_still_requires_location() {
        let searcher = Arc::new(FakeSearcher::default());
        let runner = Arc::new(FakeRunner::default());

        let err = resolver(&searcher, &runner)
            .resolve_and_validate(&env(), "node", Some(20))
            .await
            .unwrap_err();

        assert_eq!(err, ResolveError::not_found("node"));
        assert_eq!(runner.calls(), 0);
    }

    #[tokio::test]
    async fn test_shim_takes_version_from_real_node() {
        let searcher = Arc::new(
            FakeSearcher::default()
                .with("nvm-node", "/home/dev/.nvm/nvm-node")
                .with("node", "/home/dev/.nvm/versions/node/v14.2.0/bin/node"),
        );
        let runner = Arc::new(
            FakeRunner::default().with("/home/dev/.nvm/versions/node/v14.2.0/bin/node", "v14.2.0\n"),
        );

        let binary = resolver(&searcher, &runner)
            .resolve_and_validate(&env(), "nvm-node", None)
            .await
            .unwrap();

        assert_eq!(binary, BinaryDescriptor::new("/home/dev/.nvm/nvm-node", Some(14)));
        assert_eq!(searcher.lookups(), vec!["nvm-node", "node"]);
        assert_eq!(runner.calls(), 1);
    }

    #[tokio::test]
    async fn test_shim_without_real_node_is_trusted() {
        let searcher = Arc::new(FakeSearcher::default().with("yarn-node", "/usr/local/bin/yarn-node"));
        let runner = Arc::new(FakeRunner::default());

        let binary = resolver(&searcher, &runner)
            .resolve_and_validate(&env(), "yarn-node", None)
            .await
            .unwrap();

        assert_eq!(binary, BinaryDescriptor::new("/usr/local/bin/yarn-node", None));
        assert!(binary.supports_spaces_in_require_path());
        assert_eq!(searcher.lookups(), vec!["yarn-node", "node"]);
        assert_eq!(runner.calls(), 0);
    }

    #[tokio::test]
    async fn test_shim_with_unrunnable_node_is_trusted() {
        let searcher = Arc::new(
            FakeSearcher::default()
                .with("volta-node", "/home/dev/.volta/bin/volta-node")
                .with("node", "/usr/bin/node"),
        );
        let runner = Arc::new(FakeRunner::default());

        let binary = resolver(&searcher, &runner)
            .resolve_and_validate(&env(), "volta-node", None)
            .await
            .unwrap();

        assert_eq!(binary, BinaryDescriptor::new("/home/dev/.volta/bin/volta-node", None));
        assert_eq!(runner.calls(), 1);
    }

    #[tokio::test]
    async fn test_shim_with_outdated_node_fails() {
        let searcher = Arc::new(
            FakeSearcher::default()
                .with("nvm-node", "/home/dev/.nvm/nvm-node")
                .with("node", "/usr/bin/node"),
        );
        let runner = Arc::new(FakeRunner::default().with("/usr/bin/node", "v5.0.0\n"));

        let err = resolver(&searcher, &runner)
            .resolve_and_validate(&env(), "nvm-node", None)
            .await
            .unwrap_err();

        assert_eq!(err, ResolveError::out_of_date("v5.0.0", "/usr/bin/node"));
    }

    #[tokio::test]
    async fn test_not_found_on_empty_path() {
        let searcher = Arc::new(FakeSearcher::default().with("node", "/usr/bin/node"));
        let runner = Arc::new(FakeRunner::default());
        let env = EnvVars::new().with_var("PATH", "");

        let err = resolver(&searcher, &runner)
            .resolve_node(&env)
            .await
            .unwrap_err();

        assert_eq!(err, ResolveError::not_found("node"));
        assert_eq!(err.kind(), ResolveErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_spawn_failure_reports_path_as_not_found() {
        let searcher = Arc::new(FakeSearcher::default().with("node", "/usr/bin/node"));
        let runner = Arc::new(FakeRunner::default());

        let err = resolver(&searcher, &runner)
            .resolve_node(&env())
            .await
            .unwrap_err();

        assert_eq!(err, ResolveError::not_found("/usr/bin/node"));
    }

    #[tokio::test]
    async fn test_non_zero_exit_reports_path_as_not_found() {
        let searcher = Arc::new(FakeSearcher::default().with("node", "/usr/bin/node"));
        let mut runner = MockProcessRunner::new();
        runner.expect_run().times(1).returning(|_, _| {
            Err(ProcessError::NonZeroExit {
                code: Some(1),
                stderr: "Segmentation fault".to_string(),
            })
        });
        let resolver = BinaryResolver::new(searcher, Arc::new(runner));

        let err = resolver.resolve_node(&env()).await.unwrap_err();

        assert_eq!(err, ResolveError::not_found("/usr/bin/node"));
    }

    #[tokio::test]
    async fn test_absolute_path_used_verbatim() {
        let searcher = Arc::new(FakeSearcher::default());
        let runner = Arc::new(FakeRunner::default().with("/opt/node18/bin/node", "v18.0.0-nightly\n"));

        let binary = resolver(&searcher, &runner)
            .resolve_and_validate(&EnvVars::new(), "/opt/node18/bin/node", None)
            .await
            .unwrap();

        assert_eq!(binary, BinaryDescriptor::new("/opt/node18/bin/node", Some(18)));
        assert!(searcher.lookups().is_empty());
    }

    #[tokio::test]
    async fn test_custom_path_variable() {
        let searcher = Arc::new(FakeSearcher::default().with("node", "/usr/bin/node"));
        let runner = Arc::new(FakeRunner::default().with("/usr/bin/node", "v20.1.0\n"));
        let settings = ResolverSettings {
            path_variable: Some("DEBUG_PATH".to_string()),
            ..Default::default()
        };
        let resolver = BinaryResolver::with_settings(searcher, runner, &settings);

        // PATH alone is ignored when another variable is configured.
        let err = resolver.resolve_node(&env()).await.unwrap_err();
        assert_eq!(err.kind(), ResolveErrorKind::NotFound);

        let env = EnvVars::new().with_var("DEBUG_PATH", "/usr/bin");
        assert_eq!(resolver.resolve_node(&env).await.unwrap().major_version(), Some(20));
    }

    #[tokio::test]
    async fn test_shim_and_direct_share_cache() {
        let searcher = Arc::new(
            FakeSearcher::default()
                .with("nvm-node", "/home/dev/.nvm/nvm-node")
                .with("node", "/usr/bin/node"),
        );
        let runner = Arc::new(FakeRunner::default().with("/usr/bin/node", "v12.22.0\n"));
        let resolver = resolver(&searcher, &runner);

        resolver
            .resolve_and_validate(&env(), "nvm-node", None)
            .await
            .unwrap();
        let direct = resolver.resolve_node(&env()).await.unwrap();

        assert_eq!(direct, BinaryDescriptor::new("/usr/bin/node", Some(12)));
        assert_eq!(runner.calls(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_resolutions_agree() {
        let searcher = Arc::new(FakeSearcher::default().with("node", "/usr/bin/node"));
        let runner = Arc::new(FakeRunner::default().with("/usr/bin/node", "v18.12.0\n"));
        let resolver = resolver(&searcher, &runner);
        let env = env();

        let (a, b) = tokio::join!(resolver.resolve_node(&env), resolver.resolve_node(&env));

        assert_eq!(a.unwrap(), b.unwrap());
        assert!(runner.calls() <= 2);

        resolver.resolve_node(&env).await.unwrap();
        assert!(runner.calls() <= 2);
    }

    #[test]
    fn test_probe_version_text_is_untrimmed() {
        let searcher = Arc::new(FakeSearcher::default());
        let runner = Arc::new(FakeRunner::default().with("/usr/bin/node", "v16.0.0\n"));
        let resolver = resolver(&searcher, &runner);

        let text = tokio_test::block_on(resolver.probe_version_text(Path::new("/usr/bin/node")));

        assert_eq!(text.unwrap(), "v16.0.0\n");
    }
}
