#[cfg(feature = "mock")]
mod mock_tests {
    use mockall::predicate::*;
    use playlist_scrape::{
        CollectorConfig, MockPlaylistScrapeClient, MockRenderSession, MockSessionLauncher,
        PlaylistResult, PlaylistScrapeClient, RenderSession, Result, ScrapeError, ScrollCollector,
    };

    const URL: &str = "https://open.spotify.com/playlist/abc";

    fn empty_result() -> PlaylistResult {
        PlaylistResult {
            title: "Empty".to_string(),
            description: String::new(),
            image_url: String::new(),
            owner: "Nobody".to_string(),
            declared_track_count: None,
            source_url: URL.to_string(),
            scraped_track_count: 0,
            total_duration_seconds: 0,
            total_duration_text: "0 min".to_string(),
            scraped_at: chrono::Utc::now(),
            tracks: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_mock_scrape_client() -> Result<()> {
        let mut mock_client = MockPlaylistScrapeClient::new();
        let expected = empty_result();

        mock_client
            .expect_scrape_playlist()
            .with(eq(URL))
            .times(1)
            .returning(move |_| Ok(expected.clone()));

        let client: &dyn PlaylistScrapeClient = &mock_client;
        let result = client.scrape_playlist(URL).await?;

        assert_eq!(result.title, "Empty");
        assert_eq!(result.scraped_track_count, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_mock_session_closed_after_sample_error() {
        let mut launcher = MockSessionLauncher::new();
        launcher.expect_launch().times(1).returning(|| {
            let mut session = MockRenderSession::new();
            session.expect_navigate().times(1).returning(|_| Ok(()));
            session.expect_wait().returning(|_| Ok(()));
            session
                .expect_page_source()
                .times(1)
                .returning(|| Err(ScrapeError::Session("renderer gone".to_string())));
            session.expect_close().times(1).returning(|| Ok(()));
            Ok(Box::new(session) as Box<dyn RenderSession>)
        });

        let collector = ScrollCollector::new(CollectorConfig::default()).unwrap();
        let err = collector.collect(&launcher, URL, Some(5)).await.unwrap_err();

        assert!(matches!(err, ScrapeError::Session(_)));
    }

    #[tokio::test]
    async fn test_mock_close_error_does_not_mask_result() {
        let mut launcher = MockSessionLauncher::new();
        launcher.expect_launch().times(1).returning(|| {
            let mut session = MockRenderSession::new();
            session.expect_navigate().returning(|_| Ok(()));
            session.expect_wait().returning(|_| Ok(()));
            session.expect_page_source().returning(|| {
                Ok(r#"<div data-testid="tracklist-row"><div dir="auto">Only</div></div>"#
                    .to_string())
            });
            session.expect_close().times(1).returning(|| {
                Err(ScrapeError::Session("already gone".to_string()))
            });
            Ok(Box::new(session) as Box<dyn RenderSession>)
        });

        let collector = ScrollCollector::new(CollectorConfig::default()).unwrap();
        let collection = collector.collect(&launcher, URL, Some(1)).await.unwrap();

        assert_eq!(collection.tracks.len(), 1);
        assert_eq!(collection.tracks[0].title, "Only");
    }
}
