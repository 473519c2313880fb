//! CLI Command Tests
//!
//! Argument parsing plus the command handlers run against injected backends.
//! Covers exit codes and input validation.

// =============================================================================
// CLI Argument Parsing Tests
// =============================================================================

mod cli_parsing {
    use clap::Parser;
    use omdbtui::cli::{Cli, Command};
    use std::path::PathBuf;

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from(["omdbtui"]);
        assert!(!cli.is_cli_mode());
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_search_command_basic() {
        let cli = Cli::parse_from(["omdbtui", "search", "blade runner"]);
        assert!(cli.is_cli_mode());
        match cli.command {
            Some(Command::Search(cmd)) => {
                assert_eq!(cmd.title, "blade runner");
                assert_eq!(cmd.limit, 10); // default
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_search_alias_and_limit() {
        let cli = Cli::parse_from(["omdbtui", "s", "alien", "-l", "3"]);
        match cli.command {
            Some(Command::Search(cmd)) => {
                assert_eq!(cmd.title, "alien");
                assert_eq!(cmd.limit, 3);
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_search_requires_title() {
        assert!(Cli::try_parse_from(["omdbtui", "search"]).is_err());
    }

    #[test]
    fn test_search_rejects_bad_limit() {
        assert!(Cli::try_parse_from(["omdbtui", "search", "alien", "--limit", "many"]).is_err());
    }

    #[test]
    fn test_poster_command() {
        let cli = Cli::parse_from(["omdbtui", "p", "https://img.example/p.jpg"]);
        match cli.command {
            Some(Command::Poster(cmd)) => assert_eq!(cmd.url, "https://img.example/p.jpg"),
            _ => panic!("Expected Poster command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "omdbtui",
            "search",
            "alien",
            "--json",
            "-q",
            "--config",
            "/tmp/omdbtui.toml",
        ]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert!(cli.should_json());
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/omdbtui.toml")));
    }

    #[test]
    fn test_unknown_subcommand_fails() {
        assert!(Cli::try_parse_from(["omdbtui", "rate", "alien"]).is_err());
    }
}

// =============================================================================
// Command Handler Tests
// =============================================================================

mod handlers {
    use async_trait::async_trait;
    use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    use omdbtui::api::poster::{FetchError, Fetched};
    use omdbtui::cli::{ExitCode, Output, PosterCmd, SearchCmd};
    use omdbtui::commands::{poster_with, search_with};
    use omdbtui::{ImageCache, ImageFetcher, MovieService, SearchError, SearchResponse, SearchResult};

    struct MockService {
        outcome: Result<SearchResponse, SearchError>,
        terms: Mutex<Vec<String>>,
    }

    impl MockService {
        fn new(outcome: Result<SearchResponse, SearchError>) -> Self {
            Self {
                outcome,
                terms: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MovieService for MockService {
        async fn search(&self, term: &str) -> Result<SearchResponse, SearchError> {
            self.terms.lock().unwrap().push(term.to_string());
            self.outcome.clone()
        }
    }

    struct StaticFetcher(Fetched);

    #[async_trait]
    impl ImageFetcher for StaticFetcher {
        async fn fetch(&self, _url: &str) -> Result<Fetched, FetchError> {
            Ok(self.0.clone())
        }
    }

    fn quiet_json() -> Output {
        Output {
            json: true,
            quiet: true,
        }
    }

    fn search_cmd(title: &str) -> SearchCmd {
        SearchCmd {
            title: title.into(),
            limit: 2,
        }
    }

    fn results(n: usize) -> Vec<SearchResult> {
        (0..n)
            .map(|i| SearchResult {
                title: format!("Alien {}", i),
                year: "1979".into(),
                id: format!("tt00787{:02}", i),
                media_type: "movie".into(),
                poster_url: "N/A".into(),
            })
            .collect()
    }

    fn png() -> Vec<u8> {
        let img = ImageBuffer::from_pixel(10, 15, Rgb([1u8, 2, 3]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[tokio::test]
    async fn test_search_success() {
        let service = MockService::new(Ok(SearchResponse::success(results(5))));
        let code = search_with(&service, search_cmd("alien"), &quiet_json()).await;

        assert_eq!(code, ExitCode::Success);
        assert_eq!(service.terms.lock().unwrap().as_slice(), ["alien"]);
    }

    #[tokio::test]
    async fn test_search_error_exit_codes() {
        for (error, expected) in [
            (SearchError::NotFound, ExitCode::NotFound),
            (SearchError::TooManyResults, ExitCode::TooManyResults),
            (SearchError::General, ExitCode::NetworkError),
        ] {
            let service = MockService::new(Err(error));
            let code = search_with(&service, search_cmd("zzzzqqq"), &quiet_json()).await;
            assert_eq!(code, expected, "wrong exit code for {:?}", error);
        }
    }

    #[tokio::test]
    async fn test_search_unsuccessful_envelope_exit_codes() {
        for (text, expected) in [
            ("Too many results.", ExitCode::TooManyResults),
            ("Movie not found!", ExitCode::NotFound),
            ("Invalid API key!", ExitCode::NetworkError),
        ] {
            let service = MockService::new(Ok(SearchResponse::failure(text)));
            let code = search_with(&service, search_cmd("the"), &quiet_json()).await;
            assert_eq!(code, expected, "wrong exit code for {:?}", text);
        }
    }

    #[tokio::test]
    async fn test_poster_success() {
        let cache = ImageCache::new(
            Arc::new(StaticFetcher(Fetched {
                status: 200,
                content_type: Some("image/png".into()),
                bytes: png(),
            })),
            4,
        );
        let cmd = PosterCmd {
            url: "https://img.example/alien.png".into(),
        };

        assert_eq!(poster_with(&cache, cmd, &quiet_json()).await, ExitCode::Success);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_poster_failure_is_network_error() {
        let cache = ImageCache::new(
            Arc::new(StaticFetcher(Fetched {
                status: 404,
                content_type: Some("text/html".into()),
                bytes: b"not here".to_vec(),
            })),
            4,
        );
        let cmd = PosterCmd {
            url: "https://img.example/missing.png".into(),
        };

        assert_eq!(
            poster_with(&cache, cmd, &quiet_json()).await,
            ExitCode::NetworkError
        );
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_poster_rejects_non_url() {
        let cache = ImageCache::new(
            Arc::new(StaticFetcher(Fetched {
                status: 200,
                content_type: Some("image/png".into()),
                bytes: png(),
            })),
            4,
        );
        let cmd = PosterCmd { url: "N/A".into() };

        assert_eq!(
            poster_with(&cache, cmd, &quiet_json()).await,
            ExitCode::NetworkError
        );
    }
}
