use robots_lens::config::{Config, UserAgentConfig};
use robots_lens::robots::SitemapStatus;
use robots_lens::service::{AnalyzeRequest, AnalyzeResponse, CheckUrlRequest, RobotsLens};
use robots_lens::RequestError;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn lens() -> RobotsLens {
    RobotsLens::new(Config::default()).expect("Failed to build service")
}

#[tokio::test]
async fn test_analyze_by_url_with_sitemaps() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let robots = format!(
        "User-agent: *\nDisallow: /admin\nAllow: /admin/public\nFoo: bar\n\nSitemap: {}/sitemap.xml\nSitemap: /missing.xml\n",
        base_url
    );

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .and(header(
            "user-agent",
            UserAgentConfig::default().header_value().as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(robots.clone()))
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/missing.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let request = AnalyzeRequest {
        url: Some(format!("{}/robots.txt", base_url)),
        content: None,
    };
    let response = lens().analyze(request).await.expect("Analyze failed");

    let AnalyzeResponse::Analyzed(report) = response else {
        panic!("Expected a full analysis, got {:?}", response);
    };
    assert_eq!(report.fetch_status, Some(200));
    assert_eq!(report.robots_content, robots);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].line, 4);

    let sitemaps = report.parsed_data.sitemaps();
    assert_eq!(sitemaps.len(), 2);
    assert_eq!(sitemaps[0].status, Some(SitemapStatus::Status(200)));
    assert_eq!(sitemaps[1].status, Some(SitemapStatus::Status(404)));

    let stats = report.parsed_data.stats();
    assert_eq!(stats.total_rules, 2);
    assert_eq!(stats.total_agent_groups, 1);
}

#[tokio::test]
async fn test_analyze_non_200_is_soft_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let request = AnalyzeRequest {
        url: Some(format!("{}/robots.txt", mock_server.uri())),
        content: None,
    };
    let response = lens().analyze(request).await.expect("Analyze failed");

    assert_eq!(
        response,
        AnalyzeResponse::FetchRejected {
            fetch_status: 404,
            error: "Failed to fetch robots.txt. HTTP Status Code: 404".to_string(),
            robots_content: "Not Found".to_string(),
        }
    );

    let json = serde_json::to_value(&response).unwrap();
    assert!(json.get("parsed_data").is_none());
    assert!(json.get("errors").is_none());
    assert_eq!(json["fetch_status"], 404);
}

#[tokio::test]
async fn test_analyze_html_page_is_format_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<!DOCTYPE html><html><body>Oops</body></html>")
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let request = AnalyzeRequest {
        url: Some(format!("{}/robots.txt", mock_server.uri())),
        content: None,
    };
    let response = lens().analyze(request).await.expect("Analyze failed");

    let json = serde_json::to_value(&response).unwrap();
    assert!(json["error"].as_str().unwrap().starts_with("Invalid robots.txt content"));
    assert_eq!(
        json["robots_content"],
        "<!DOCTYPE html><html><body>Oops</body></html>"
    );
}

#[tokio::test]
async fn test_analyze_sitemap_checks_can_be_disabled() {
    let mut config = Config::default();
    config.fetcher.check_sitemaps = false;
    let lens = RobotsLens::new(config).unwrap();

    let request = AnalyzeRequest {
        url: None,
        content: Some("Sitemap: http://127.0.0.1:1/sitemap.xml".to_string()),
    };
    let AnalyzeResponse::Analyzed(report) = lens.analyze(request).await.unwrap() else {
        panic!("Expected a full analysis");
    };
    assert_eq!(report.parsed_data.sitemaps()[0].status, None);
}

#[tokio::test]
async fn test_analyze_unreachable_host_is_request_error() {
    let request = AnalyzeRequest {
        url: Some("http://127.0.0.1:1/robots.txt".to_string()),
        content: None,
    };
    let err = lens().analyze(request).await.unwrap_err();
    assert!(matches!(err, RequestError::Transport(_)));
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_check_url_follows_redirects() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/new", mock_server.uri()).as_str()),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let response = lens()
        .check_url(CheckUrlRequest {
            url: Some(format!("{}/old", mock_server.uri())),
        })
        .await
        .expect("Check failed");
    assert_eq!(response.status_code, 204);
}
