#[allow(unused_imports)]
#[cfg(test)]
mod tests {

    // Load all internal modules:
    use serde_json::{json, Value};
    use std::{
        io::{Read, Write},
        net::{TcpListener, TcpStream},
        sync::{mpsc, Arc},
        thread,
        time::Duration,
    };

    use crate::configuration::*;
    use crate::mappers::metrics::{flatten_metrics, format_metric_label};
    use crate::mappers::ping::parse_ping_job;
    use crate::*;


    const JOB_ID: &str = "3f2b8c1e-9a4d-4c7e-8f00-123456789abc";


    fn init_logger() {
        let _ = setup_logger(&Config {
            log_level: Some("TRACE".to_string()),
            ..Config::default()
        });
    }


    fn admin() -> Credentials {
        Credentials::new("admin", "secret")
    }


    /// Reads a single HTTP request (headers and Content-Length body)
    fn read_request(stream: &mut TcpStream) -> String {
        stream
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let read = stream.read(&mut chunk).unwrap_or(0);
            if read == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..read]);
            let text = String::from_utf8_lossy(&buffer).to_string();
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|line| {
                        line.to_ascii_lowercase()
                            .strip_prefix("content-length:")
                            .map(|value| value.trim().parse::<usize>().unwrap_or(0))
                    })
                    .unwrap_or(0);
                if buffer.len() >= end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buffer).to_string()
    }


    /// Serves given responses, one per connection, and forwards raw requests
    fn serve(responses: Vec<(u32, String)>) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            for (code, body) in responses {
                let (mut stream, _) = match listener.accept() {
                    Ok(connection) => connection,
                    Err(_) => return,
                };
                let request = read_request(&mut stream);
                let _ = sender.send(request);
                let reply = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    code,
                    if code < 300 { "OK" } else { "Error" },
                    body.len(),
                    body
                );
                let _ = stream.write_all(reply.as_bytes());
                let _ = stream.flush();
            }
        });
        (base_url, receiver)
    }


    fn header_value<'a>(request: &'a str, name: &str) -> Option<&'a str> {
        request.lines().find_map(|line| {
            let (key, value) = line.split_once(':')?;
            if key.trim().eq_ignore_ascii_case(name) {
                Some(value.trim())
            } else {
                None
            }
        })
    }


    fn request_body(request: &str) -> Value {
        let (_, body) = request.split_once("\r\n\r\n").unwrap();
        serde_json::from_str(body).unwrap()
    }


    //
    // Requests:
    //

    #[test]
    fn test_payload_contains_only_fields_of_check_type() {
        for check_type in CheckType::ALL {
            let request = CheckRequest::new(check_type, "example.com", Some(443)).unwrap();
            let payload = serde_json::to_value(request.payload()).unwrap();
            let object = payload.as_object().unwrap();
            assert_eq!(object["checkTypes"], json!([check_type.name()]));
            assert_eq!(object["target"], json!("example.com"));
            if check_type == CheckType::TcpPort {
                assert_eq!(object.len(), 3);
                assert_eq!(object["port"], json!(443));
            } else {
                assert_eq!(object.len(), 2);
                assert!(!object.contains_key("port"));
            }
        }
    }


    #[test]
    fn test_check_request_validation() {
        assert_eq!(CheckRequest::http("  "), Err(RequestError::EmptyTarget));
        assert_eq!(
            CheckRequest::new(CheckType::TcpPort, "host", None),
            Err(RequestError::MissingPort)
        );
        assert_eq!(
            CheckRequest::tcp_port("host", 0),
            Err(RequestError::PortOutOfRange(0))
        );
        assert_eq!(
            CheckRequest::tcp_port("host", 65536),
            Err(RequestError::PortOutOfRange(65536))
        );
        let request = CheckRequest::tcp_port(" scanme.nmap.org ", 65535).unwrap();
        assert_eq!(request.target(), "scanme.nmap.org");
        assert_eq!(request.port(), Some(65535));

        let ping = CheckRequest::new(CheckType::Ping, "1.1.1.1", Some(80)).unwrap();
        assert_eq!(ping.port(), None);
    }


    #[test]
    fn test_check_type_names() {
        assert_eq!(CheckType::DnsLookup.to_string(), "DNS_LOOKUP");
        assert_eq!("tcp_port".parse::<CheckType>(), Ok(CheckType::TcpPort));
        assert_eq!(
            serde_json::to_string(&CheckType::Traceroute).unwrap(),
            "\"TRACEROUTE\""
        );
        assert!(matches!(
            "SMTP".parse::<CheckType>(),
            Err(RequestError::UnknownCheckType(_))
        ));
    }


    //
    // Job ids:
    //

    #[test]
    fn test_job_id_is_taken_only_when_uuid() {
        assert_eq!(
            parse_job_id(&format!("{{\"id\":\"{}\"}}", JOB_ID)),
            Some(JOB_ID.to_string())
        );
        assert_eq!(parse_job_id("{\"id\":\"not-a-uuid\"}"), None);
        assert_eq!(parse_job_id("{\"id\":\"3f2b8c1e9a4d4c7e8f00123456789abc\"}"), None);
        assert_eq!(parse_job_id("{\"id\":42}"), None);
        assert_eq!(parse_job_id("{\"id\":null}"), None);
        assert_eq!(parse_job_id("<html>error</html>"), None);
        assert_eq!(parse_job_id(""), None);
    }


    //
    // Normalizer:
    //

    #[test]
    fn test_ping_job_is_normalized() {
        let body = r#"{"result":[{"id":"r1","ping":{"minRtt":1.0,"avgRtt":2.5,"maxRtt":4.0,"transmitted":4,"received":4,"packetLoss":0.0}}],"id":"j1","target":"1.1.1.1","status":"done"}"#;
        let normalized = normalize(Some(body));
        let job = normalized.ping_job().unwrap();
        assert_eq!(job.id.as_deref(), Some("j1"));
        assert_eq!(job.target.as_deref(), Some("1.1.1.1"));
        assert_eq!(job.status.as_deref(), Some("done"));
        assert_eq!(job.executed_at, None);
        assert_eq!(job.total_duration_millis, None);
        assert_eq!(job.results.len(), 1);

        let measurement = &job.results[0];
        assert_eq!(measurement.id.as_deref(), Some("r1"));
        let metrics = measurement.metrics.as_ref().unwrap();
        assert_eq!(metrics.min_rtt_ms, Some(1.0));
        assert_eq!(metrics.avg_rtt_ms, Some(2.5));
        assert_eq!(metrics.max_rtt_ms, Some(4.0));
        assert_eq!(metrics.transmitted, Some(4));
        assert_eq!(metrics.received, Some(4));
        assert_eq!(metrics.packet_loss_percent, Some(0.0));
        assert_eq!(metrics.location, None);
    }


    #[test]
    fn test_ping_sentinels_read_as_absent() {
        let body = json!({
            "id": "j2",
            "totalDurationMillis": 0,
            "result": [
                {"type": "PING", "durationMillis": 0, "ping": {
                    "transmitted": -1, "received": 0, "packetLoss": "NaN", "minRtt": null,
                    "avgRtt": "3.25", "location": "Frankfurt", "country": null
                }},
                {"id": "skipped, no ping object"},
                "not an object"
            ]
        })
        .to_string();
        let job = parse_ping_job(Some(&body)).unwrap();
        assert_eq!(job.total_duration_millis, None);
        assert_eq!(job.results.len(), 1);
        let measurement = &job.results[0];
        assert_eq!(measurement.kind.as_deref(), Some("PING"));
        assert_eq!(measurement.duration_millis, None);
        let metrics = measurement.metrics.as_ref().unwrap();
        assert_eq!(metrics.transmitted, None);
        assert_eq!(metrics.received, Some(0));
        assert_eq!(metrics.packet_loss_percent, None);
        assert_eq!(metrics.min_rtt_ms, None);
        assert_eq!(metrics.avg_rtt_ms, Some(3.25));
        assert_eq!(metrics.location.as_deref(), Some("Frankfurt"));
        assert_eq!(metrics.country, None);
    }


    #[test]
    fn test_metric_groups_are_normalized() {
        let body = r#"{"results":[{"checkType":"HTTP","metrics":{"latency_ms":120,"ok":true}}]}"#;
        assert_eq!(
            normalize(Some(body)),
            Normalized::MetricGroups(vec![MetricGroup {
                title: Some("HTTP".to_string()),
                metrics: vec![
                    MetricItem::new("Latency Ms", "120"),
                    MetricItem::new("Ok", "true"),
                ],
            }])
        );
    }


    #[test]
    fn test_metric_groups_order_and_titles() {
        let body = json!({
            "checkType": "DNS_LOOKUP",
            "metrics": {"records.count": 2},
            "results": [
                {"checkType": " ", "metrics": {"a": 1}},
                {"checkType": "PING", "metrics": {}},
                {"checkType": "TCP_PORT", "metrics": {"open": false}},
                {"metrics": "not an object"}
            ]
        })
        .to_string();
        let normalized = normalize(Some(&body));
        let groups = normalized.metric_groups().unwrap();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].title, None);
        assert_eq!(groups[0].metrics, vec![MetricItem::new("A", "1")]);
        assert_eq!(groups[1].title.as_deref(), Some("TCP_PORT"));
        assert_eq!(groups[1].metrics, vec![MetricItem::new("Open", "false")]);
        assert_eq!(groups[2].title.as_deref(), Some("DNS_LOOKUP"));
        assert_eq!(groups[2].metrics, vec![MetricItem::new("Records Count", "2")]);
    }


    #[test]
    fn test_metrics_flatten_one_level_only() {
        let metrics = json!({
            "http": {"statusCode": 200, "headers": {"server": "nginx"}, "gone": null},
            "hops": [1, 2],
            "name": "edge",
            "skipped": null,
            "ratio": 0.5
        });
        let items = flatten_metrics(metrics.as_object().unwrap(), &NormalizerOptions::default());
        assert_eq!(
            items,
            vec![
                MetricItem::new("Http Statuscode", "200"),
                MetricItem::new("Http Headers", "{\"server\":\"nginx\"}"),
                MetricItem::new("Hops", "[1,2]"),
                MetricItem::new("Name", "edge"),
                MetricItem::new("Ratio", "0.5"),
            ]
        );
    }


    #[test]
    fn test_ignored_metric_keys() {
        let body = r#"{"checkType":"HTTP","metrics":{"jobId":"x","latency_ms":5,"meta":{"a":1}}}"#;
        let options = NormalizerOptions::ignoring(["jobId", "meta"]);
        assert_eq!(
            normalize_with(Some(body), &options),
            Normalized::MetricGroups(vec![MetricGroup {
                title: Some("HTTP".to_string()),
                metrics: vec![MetricItem::new("Latency Ms", "5")],
            }])
        );

        let only_ignored = r#"{"metrics":{"jobId":"x"}}"#;
        assert_eq!(
            normalize_with(Some(only_ignored), &options),
            Normalized::RawText(only_ignored.to_string())
        );
    }


    #[test]
    fn test_metric_label_format() {
        assert_eq!(format_metric_label("min_rtt"), "Min Rtt");
        assert_eq!(format_metric_label("http.statusCode"), "Http Statuscode");
        assert_eq!(format_metric_label("  LATENCY__ms. "), "Latency Ms");
        assert_eq!(format_metric_label("ok"), "Ok");
        assert_eq!(format_metric_label("__"), "");
    }


    #[test]
    fn test_ping_job_has_priority_over_metrics() {
        let body = json!({
            "result": [{"ping": {"avgRtt": 7.0}}],
            "results": [{"checkType": "PING", "metrics": {"avg": 7}}]
        })
        .to_string();
        assert!(normalize(Some(&body)).ping_job().is_some());
    }


    #[test]
    fn test_empty_ping_results_fall_through() {
        let body = r#"{"result":[]}"#;
        assert_eq!(normalize(Some(body)), Normalized::RawText(body.to_string()));

        let with_metrics = r#"{"result":[{"http":{}}],"metrics":{"up":1}}"#;
        assert_eq!(
            normalize(Some(with_metrics)),
            Normalized::MetricGroups(vec![MetricGroup {
                title: None,
                metrics: vec![MetricItem::new("Up", "1")],
            }])
        );
    }


    #[test]
    fn test_unstructured_bodies_stay_raw() {
        let html = "<html>error</html>";
        assert_eq!(normalize(Some(html)), Normalized::RawText(html.to_string()));
        assert_eq!(normalize(Some("[1,2,3]")), Normalized::RawText("[1,2,3]".to_string()));
        assert_eq!(
            normalize(Some("{\"status\":\"queued\"}")),
            Normalized::RawText("{\"status\":\"queued\"}".to_string())
        );
        assert_eq!(normalize(Some("  \n")), Normalized::RawText(String::new()));
        assert_eq!(normalize(None), Normalized::RawText(String::new()));
    }


    #[test]
    fn test_normalize_is_idempotent() {
        let bodies = [
            r#"{"result":[{"id":"r1","ping":{"minRtt":1.0}}],"id":"j1"}"#,
            r#"{"results":[{"checkType":"HTTP","metrics":{"latency_ms":120}}]}"#,
            "<html>error</html>",
        ];
        for body in bodies {
            assert_eq!(normalize(Some(body)), normalize(Some(body)));
        }
    }


    #[test]
    fn test_ping_job_timestamps() {
        let body = json!({
            "executedAt": "2024-05-01T10:00:00Z",
            "finishedAt": "yesterday",
            "totalDurationMillis": 1500,
            "result": [{"ping": {}}]
        })
        .to_string();
        let job = parse_ping_job(Some(&body)).unwrap();
        assert_eq!(
            job.executed_at_time().map(|time| time.timestamp()),
            Some(1_714_557_600)
        );
        assert_eq!(job.finished_at_time(), None);
        assert_eq!(job.total_duration(), Some(Duration::from_millis(1500)));
    }


    //
    // Detail extractors:
    //

    #[test]
    fn test_http_details() {
        let body = json!({"result": [{
            "id": "p1", "status": "", "durationMillis": 310,
            "http": {"location": "Amsterdam", "country": "NL", "timeMillis": 0, "statusCode": 301,
                     "ip": "93.184.216.34", "result": "Moved"}
        }]})
        .to_string();
        let details = parse_http_result(Some(&body)).unwrap();
        assert_eq!(details.id.as_deref(), Some("p1"));
        assert_eq!(details.status, None);
        assert_eq!(details.duration_millis, Some(310));
        assert_eq!(details.time_millis, None);
        assert_eq!(details.status_code, Some(301));
        assert_eq!(details.result.as_deref(), Some("Moved"));
        assert_eq!(
            extract_details(CheckType::Http, Some(&body)),
            Some(CheckDetails::Http(details))
        );
        assert_eq!(extract_details(CheckType::TcpPort, Some(&body)), None);
    }


    #[test]
    fn test_tcp_details() {
        let body = r#"{"result":[{"status":"done","tcp":{"status":"open","connectTimeMillis":12,"ip":"45.33.32.156"}}]}"#;
        let details = parse_tcp_result(Some(body)).unwrap();
        assert_eq!(details.status.as_deref(), Some("done"));
        assert_eq!(details.connection_status.as_deref(), Some("open"));
        assert_eq!(details.connect_time_millis, Some(12));
        assert_eq!(details.location, None);
    }


    #[test]
    fn test_traceroute_details() {
        let body = json!({"result": [{"message": "ok", "traceroute": {"hops": [
            {"hop": 1, "ip": "10.0.0.1", "time": "1.2 ms"},
            {"hop": -1, "ip": " ", "time": null},
            42
        ]}}]})
        .to_string();
        let details = parse_traceroute_result(Some(&body)).unwrap();
        assert_eq!(details.message.as_deref(), Some("ok"));
        assert_eq!(
            details.hops,
            vec![
                TracerouteHop {
                    hop: Some(1),
                    ip: Some("10.0.0.1".to_string()),
                    time: Some("1.2 ms".to_string()),
                },
                TracerouteHop::default(),
            ]
        );

        let no_hops = r#"{"result":[{"traceroute":{"hops":[]}}]}"#;
        assert_eq!(parse_traceroute_result(Some(no_hops)), None);
    }


    #[test]
    fn test_dns_details() {
        let body = r#"{"result":[{"dns":{"records":["93.184.216.34","",null,7],"ttl":300}}]}"#;
        let details = parse_dns_lookup_result(Some(body)).unwrap();
        assert_eq!(details.records, vec!["93.184.216.34".to_string(), "7".to_string()]);
        assert_eq!(details.ttl.as_deref(), Some("300"));

        let empty = r#"{"result":[{"dns":{"records":[" "]}}]}"#;
        assert_eq!(parse_dns_lookup_result(Some(empty)), None);
        assert_eq!(parse_dns_lookup_result(Some("not json")), None);
    }


    //
    // Credentials and configuration:
    //

    #[test]
    fn test_credentials_debug_masks_password() {
        let output = format!("{:?}", admin());
        assert!(output.contains("admin"));
        assert!(!output.contains("secret"));
    }


    #[test]
    fn test_credential_store_single_slot() {
        let store = CredentialStore::new();
        assert_eq!(store.current(), None);
        let shared = store.clone();
        shared.replace(admin());
        assert_eq!(store.current(), Some(admin()));
        store.replace(Credentials::new("ops", "pass"));
        assert_eq!(shared.current().map(|c| c.username), Some("ops".to_string()));
        store.clear();
        assert_eq!(shared.current(), None);
    }


    #[test]
    fn test_config_load_from_file() {
        let path = std::env::temp_dir().join(format!("hostmaster-test-{}.conf", std::process::id()));
        std::fs::write(
            &path,
            r#"{"base_url": "http://10.0.0.1:8080/", "log_level": "debug", "timeout": 3, "ignored_metric_keys": ["jobId"]}"#,
        )
        .unwrap();
        let config = Config::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(config.base_url(), "http://10.0.0.1:8080");
        assert_eq!(config.get_log_level(), tracing::level_filters::LevelFilter::DEBUG);
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.connection_timeout(), Duration::from_secs(CHECK_CONNECTION_TIMEOUT));
        assert!(config.normalizer_options().is_ignored("jobId"));

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Config::load_from(path.to_str().unwrap()),
            Err(ConfigError::Malformed(..))
        ));
        let _ = std::fs::remove_file(&path);

        assert!(matches!(
            Config::load_from("/nonexistent/hostmaster.conf"),
            Err(ConfigError::Unreadable(..))
        ));
    }


    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.get_log_level(), tracing::level_filters::LevelFilter::INFO);
        assert_eq!(config.timeout(), Duration::from_secs(CHECK_TIMEOUT));
        assert!(config.user_agent().starts_with(DEFAULT_USER_AGENT_NAME));
        assert_eq!(config.normalizer_options(), NormalizerOptions::default());
    }


    //
    // Transport:
    //

    #[test]
    fn test_submit_posts_payload_with_basic_auth() {
        init_logger();
        let (base_url, requests) = serve(vec![(202, format!("{{\"id\":\"{}\"}}", JOB_ID))]);
        let client = HostClient::with_base_url(&base_url);
        let request = CheckRequest::tcp_port("scanme.nmap.org", 80).unwrap();

        let result = client.submit(&admin(), &request);
        assert_eq!(result.error, None);
        assert_eq!(result.status_code, Some(202));
        assert_eq!(result.job_id.as_deref(), Some(JOB_ID));
        assert!(result.is_pending_job());

        let raw = requests.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(raw.starts_with("POST /api/checks HTTP/1.1\r\n"));
        assert_eq!(header_value(&raw, "Authorization"), Some("Basic YWRtaW46c2VjcmV0"));
        assert_eq!(header_value(&raw, "Content-Type"), Some(JSON_CONTENT_TYPE));
        assert_eq!(
            request_body(&raw),
            json!({"checkTypes": ["TCP_PORT"], "target": "scanme.nmap.org", "port": 80})
        );
    }


    #[test]
    fn test_submit_then_fetch_targets_job_url() {
        init_logger();
        let job_body = r#"{"id":"3f2b8c1e-9a4d-4c7e-8f00-123456789abc","status":"done","result":[{"ping":{"avgRtt":2.0}}]}"#;
        let (base_url, requests) = serve(vec![
            (200, format!("{{\"id\":\"{}\"}}", JOB_ID)),
            (200, job_body.to_string()),
        ]);
        let client = HostClient::with_base_url(&format!("{}/", base_url));

        let submitted = client.submit(&admin(), &CheckRequest::ping("1.1.1.1").unwrap());
        let submit_raw = requests.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(request_body(&submit_raw), json!({"checkTypes": ["PING"], "target": "1.1.1.1"}));

        let job_id = submitted.job_id.unwrap();
        assert_eq!(client.job_url(&job_id), format!("{}/api/checks/{}", base_url, JOB_ID));
        let fetched = client.fetch_job(&admin(), &job_id);
        let fetch_raw = requests.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(fetch_raw.starts_with(&format!("GET /api/checks/{} HTTP/1.1\r\n", JOB_ID)));
        assert_eq!(header_value(&fetch_raw, "Authorization"), Some("Basic YWRtaW46c2VjcmV0"));

        assert_eq!(fetched.status_code, Some(200));
        assert_eq!(fetched.body.as_deref(), Some(job_body));
        let normalized = fetched.normalized(&NormalizerOptions::default());
        assert_eq!(normalized.ping_job().map(|job| job.results.len()), Some(1));
    }


    #[test]
    fn test_error_status_is_recorded_as_is() {
        let body = r#"{"id":"not-a-uuid","message":"boom"}"#;
        let (base_url, _requests) = serve(vec![(500, body.to_string())]);
        let client = HostClient::with_base_url(&base_url);

        let result = client.fetch_job(&admin(), JOB_ID);
        assert_eq!(result.status_code, Some(500));
        assert_eq!(result.job_id, None);
        assert_eq!(result.body.as_deref(), Some(body));
        assert_eq!(result.error, None);
        assert!(result.is_success());
        assert!(!result.is_pending_job());
    }


    #[test]
    fn test_connection_failure_becomes_error() {
        init_logger();
        let closed = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", closed.local_addr().unwrap());
        drop(closed);
        let client = HostClient::with_base_url(&base_url);

        let result = client.submit(&admin(), &CheckRequest::http("https://example.com").unwrap());
        assert_eq!(result.status_code, None);
        assert_eq!(result.job_id, None);
        assert_eq!(result.body, None);
        let error = result.error.unwrap();
        assert!(error.contains("Failed to connect to URL"));
        assert!(error.contains("CURLE_COULDNT_CONNECT"));
    }


    #[test]
    fn test_blank_job_id_is_not_fetched() {
        let client = HostClient::with_base_url("http://127.0.0.1:9");
        let result = client.fetch_job(&admin(), "  ");
        assert_eq!(result, CheckResult::failure(Unexpected::EmptyJobId));
        assert_eq!(result.error.as_deref(), Some("Job id is empty"));
    }


    #[test]
    fn test_client_is_shared_between_threads() {
        let responses = (0..4).map(|_| (200, "{\"ok\":true}".to_string())).collect();
        let (base_url, _requests) = serve(responses);
        let client = Arc::new(HostClient::with_base_url(&base_url));

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let client = Arc::clone(&client);
                thread::spawn(move || client.fetch_job(&admin(), JOB_ID))
            })
            .collect();
        for worker in workers {
            let result = worker.join().unwrap();
            assert_eq!(result.status_code, Some(200));
            assert_eq!(result.body.as_deref(), Some("{\"ok\":true}"));
        }
    }


    //
    // Service:
    //

    #[test]
    fn test_service_requires_credentials() {
        let store = CredentialStore::new();
        let service = CheckService::new(
            &Config {
                base_url: Some("http://127.0.0.1:9".to_string()),
                ..Config::default()
            },
            store,
        );
        let result = service.submit_check(&CheckRequest::dns_lookup("example.com").unwrap());
        assert_eq!(result.error.as_deref(), Some(MISSING_CREDENTIALS_MESSAGE));
        assert_eq!(service.fetch_job(JOB_ID).error.as_deref(), Some(MISSING_CREDENTIALS_MESSAGE));
    }


    #[test]
    fn test_service_uses_current_credentials() {
        let body = r#"{"results":[{"checkType":"DNS_LOOKUP","metrics":{"records":2}}],"result":[{"dns":{"records":["1.2.3.4"]}}]}"#;
        let (base_url, requests) = serve(vec![(200, body.to_string())]);
        let store = CredentialStore::new();
        let service = CheckService::with_client(Arc::new(HostClient::with_base_url(&base_url)), store.clone());
        store.replace(Credentials::new("ops", "pass"));

        let result = service.submit_check(&CheckRequest::dns_lookup("example.com").unwrap());
        let raw = requests.recv_timeout(Duration::from_secs(5)).unwrap();
        // base64("ops:pass")
        assert_eq!(header_value(&raw, "Authorization"), Some("Basic b3BzOnBhc3M="));

        assert_eq!(
            service.normalize(&result).metric_groups().map(|groups| groups[0].metrics.clone()),
            Some(vec![MetricItem::new("Records", "2")])
        );
        match service.details(CheckType::DnsLookup, &result) {
            Some(CheckDetails::DnsLookup(dns)) => assert_eq!(dns.records, vec!["1.2.3.4".to_string()]),
            other => panic!("Unexpected details: {:?}", other),
        }
    }


    #[test]
    fn test_check_result_serialization() {
        let result = CheckResult::response(202, Some(JOB_ID.to_string()), "{}".to_string());
        let output: Value = serde_json::from_str(&result.to_string()).unwrap();
        assert_eq!(output, json!({"statusCode": 202, "jobId": JOB_ID, "body": "{}"}));
    }
}
