use robots_lens::config::Config;
use robots_lens::robots::{decide, parse_policy, Verdict};
use robots_lens::service::{CompareRequest, MultiTestRequest, RobotsLens, TestUrlRequest};
use robots_lens::{diff, DiffTag, RequestError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn lens() -> RobotsLens {
    RobotsLens::new(Config::default()).expect("Failed to build service")
}

#[tokio::test]
async fn test_test_urls_from_remote_robots() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "User-agent: Googlebot\nDisallow: /nogoogle\n\nUser-agent: *\nDisallow: /private\nAllow: /private/ok",
        ))
        .mount(&mock_server)
        .await;

    let request = TestUrlRequest {
        robots_url: Some(format!("{}/robots.txt", base_url)),
        robots_content: None,
        test_urls: vec![
            format!("{}/private/ok/page?x=1", base_url),
            format!("{}/private/secret", base_url),
            "/nogoogle".to_string(),
        ],
        user_agents: Some(strings(&["Googlebot", "*"])),
    };
    let response = lens().test_urls(request).await.expect("Test failed");

    assert_eq!(response.results.len(), 3);
    let ok_page = &response.results[0].results;
    assert_eq!(ok_page.get("Googlebot"), Some(&Verdict::Decided(true)));
    assert_eq!(ok_page.get("*"), Some(&Verdict::Decided(true)));

    let secret = &response.results[1].results;
    assert_eq!(secret.get("Googlebot"), Some(&Verdict::Decided(true)));
    assert_eq!(secret.get("*"), Some(&Verdict::Decided(false)));

    let nogoogle = &response.results[2].results;
    assert_eq!(nogoogle.get("Googlebot"), Some(&Verdict::Decided(false)));
    assert_eq!(nogoogle.get("*"), Some(&Verdict::Decided(true)));
}

#[tokio::test]
async fn test_test_urls_fetch_failure_is_request_error() {
    let request = TestUrlRequest {
        robots_url: Some("http://127.0.0.1:1/robots.txt".to_string()),
        robots_content: None,
        test_urls: strings(&["/"]),
        user_agents: None,
    };
    let err = lens().test_urls(request).await.unwrap_err();
    assert!(matches!(err, RequestError::Transport(_)));
}

#[test]
fn test_multi_test_json_shape() {
    let request = MultiTestRequest {
        robots_contents: strings(&[
            "User-agent: *\nDisallow: /a",
            "User-agent: *\nDisallow: /b",
        ]),
        test_urls: strings(&["/a", "/b"]),
        user_agents: None,
    };
    let response = lens().multi_test(request).expect("MultiTest failed");
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "results": [
                {
                    "url": "/a",
                    "robots_results": [
                        {"robots_index": 0, "results": {"*": false}},
                        {"robots_index": 1, "results": {"*": true}}
                    ]
                },
                {
                    "url": "/b",
                    "robots_results": [
                        {"robots_index": 0, "results": {"*": true}},
                        {"robots_index": 1, "results": {"*": false}}
                    ]
                }
            ]
        })
    );
}

#[test]
fn test_multi_test_isolates_bad_url() {
    let request = MultiTestRequest {
        robots_contents: strings(&["User-agent: *\nDisallow: /"]),
        test_urls: strings(&["mailto://nobody", "/fine"]),
        user_agents: None,
    };
    let response = lens().multi_test(request).expect("MultiTest failed");

    let bad = &response.results[0].robots_results[0].results;
    assert!(matches!(bad.get("*"), Some(Verdict::Failed { .. })));
    let good = &response.results[1].robots_results[0].results;
    assert_eq!(good.get("*"), Some(&Verdict::Decided(false)));
}

#[test]
fn test_grouping_and_precedence_end_to_end() {
    let doc = parse_policy(
        "User-agent: A\nUser-agent: B\nDisallow: /x\nUser-agent: C\nDisallow: /y\n",
    );
    assert_eq!(doc.groups().len(), 2);
    assert!(!decide(&doc, "a", "/x"));
    assert!(!decide(&doc, "B", "/x/deeper"));
    assert!(decide(&doc, "C", "/x"));
    assert!(!decide(&doc, "C", "/y"));
    assert!(decide(&doc, "D", "/x"));
}

#[test]
fn test_compare_round_trip_properties() {
    let v1 = "User-agent: *\nDisallow: /old\nAllow: /shared\n";
    let v2 = "User-agent: *\nAllow: /shared\nDisallow: /new\n";

    assert!(diff(v1, v1).is_empty());

    let forward = diff(v1, v2);
    let backward = diff(v2, v1);
    assert_eq!(forward.len(), backward.len());
    for (f, b) in forward.iter().zip(&backward) {
        assert_eq!(f.content, b.content);
        assert_eq!(f.tag.swapped(), b.tag);
    }
    assert_eq!(forward.iter().filter(|l| l.tag == DiffTag::Context).count(), 2);

    let response = lens()
        .compare(CompareRequest {
            content1: Some(v1.to_string()),
            content2: Some(v2.to_string()),
        })
        .unwrap();
    assert_eq!(
        response.diff,
        vec![
            "--- Version 1",
            "+++ Version 2",
            "@@ -1,3 +1,3 @@",
            " User-agent: *",
            "-Disallow: /old",
            " Allow: /shared",
            "+Disallow: /new",
        ]
    );
}
