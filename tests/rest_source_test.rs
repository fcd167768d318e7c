use hire_debate::core::DataSource;
use hire_debate::{DebateEngine, DebateError, Decision, RestSource, TomlConfig};
use httpmock::prelude::*;
use serde_json::json;

fn mock_application<'a>(
    server: &'a MockServer,
    app_id: &str,
    row: serde_json::Value,
) -> httpmock::Mock<'a> {
    let filter = format!("eq.{}", app_id);
    server.mock(move |when, then| {
        when.method(GET)
            .path("/application")
            .query_param("app_id", filter.as_str());
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!([row]));
    })
}

fn mock_interview<'a>(server: &'a MockServer, app_id: &str, interview_id: &str) -> httpmock::Mock<'a> {
    let filter = format!("eq.{}", app_id);
    let body = json!([{"interview_id": interview_id, "created_at": "2025-10-18T12:00:00Z"}]);
    server.mock(move |when, then| {
        when.method(GET)
            .path("/interview")
            .query_param("app_id", filter.as_str())
            .query_param("order", "created_at.desc")
            .query_param("limit", "1");
        then.status(200).json_body(body);
    })
}

#[tokio::test]
async fn test_fetch_candidate_with_latest_interview() {
    let server = MockServer::start();
    let application = mock_application(
        &server,
        "app-7",
        json!({
            "app_id": "app-7",
            "name": "Jordan Lee",
            "email": "jordan@example.com",
            "job_id": "job-3",
            "resume_skills": "python, go",
            "years_experience": 4
        }),
    );
    let interview = mock_interview(&server, "app-7", "int-9");
    let agent = server.mock(|when, then| {
        when.method(GET)
            .path("/agent")
            .query_param("interview_id", "eq.int-9");
        then.status(200).json_body(json!([
            {"round": 1, "type": "behavioral", "response": "I stepped in when the deploy broke."},
            {"round": 2, "type": null, "response": null}
        ]));
    });

    let source = RestSource::new(server.url("/"));
    let candidate = source.fetch_candidate("app-7").await.unwrap();

    application.assert();
    interview.assert();
    agent.assert();

    assert_eq!(candidate.name, "Jordan Lee");
    assert!(candidate.has_skill("python") && candidate.has_skill("go"));
    assert_eq!(candidate.years_experience, 4);
    assert_eq!(candidate.behavioral_transcript.len(), 2);
    assert_eq!(candidate.behavioral_transcript[0].question, "behavioral (round 1)");
    assert_eq!(
        candidate.behavioral_transcript[0].answer,
        "I stepped in when the deploy broke."
    );
    assert_eq!(candidate.behavioral_transcript[1].question, "unknown (round 2)");
    assert_eq!(candidate.behavioral_transcript[1].answer, "");
}

#[tokio::test]
async fn test_candidate_without_interview_has_empty_transcript() {
    let server = MockServer::start();
    mock_application(&server, "app-1", json!({"name": "Sam", "job_id": "job-1"}));
    server.mock(|when, then| {
        when.method(GET).path("/interview");
        then.status(200).json_body(json!([]));
    });

    let candidate = RestSource::new(server.url(""))
        .fetch_candidate("app-1")
        .await
        .unwrap();
    assert!(candidate.behavioral_transcript.is_empty());
    assert!(candidate.resume_skills.is_empty());
    // no experience column: same placeholder as the job's minimum
    assert_eq!(candidate.years_experience, 2);
}

#[tokio::test]
async fn test_fetch_job_normalizes_skill_columns() {
    let server = MockServer::start();
    mock_application(&server, "app-7", json!({"job_id": "job-3"}));
    let job_mock = server.mock(|when, then| {
        when.method(GET).path("/job").query_param("job_id", "eq.job-3");
        then.status(200).json_body(json!([{
            "title": "Data Engineer",
            "required_skills": "python, sql ,airflow",
            "preferred_skills": ["ownership", "bias for action"],
            "description": "Pipelines"
        }]));
    });

    let job = RestSource::new(server.url(""))
        .with_default_min_years(3)
        .fetch_job("app-7")
        .await
        .unwrap();

    job_mock.assert();
    assert_eq!(job.title, "Data Engineer");
    assert_eq!(job.required_skills, vec!["python", "sql", "airflow"]);
    assert_eq!(job.culture_traits, vec!["ownership", "bias for action"]);
    assert_eq!(job.min_years_experience, 3);
}

#[tokio::test]
async fn test_unknown_application_is_not_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/application");
        then.status(200).json_body(json!([]));
    });

    let source = RestSource::new(server.url(""));
    assert!(matches!(
        source.fetch_candidate("missing").await,
        Err(DebateError::NotFound { entity: "application", .. })
    ));
    assert!(matches!(
        source.fetch_job("missing").await,
        Err(DebateError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_server_error_is_api_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/application");
        then.status(500);
    });

    let err = RestSource::new(server.url(""))
        .fetch_candidate("app-1")
        .await
        .unwrap_err();
    assert!(matches!(err, DebateError::ApiError(_)));
    assert_eq!(err.severity(), hire_debate::utils::error::ErrorSeverity::Medium);
}

#[tokio::test]
async fn test_api_key_headers_are_sent() {
    let server = MockServer::start();
    let authed = server.mock(|when, then| {
        when.method(GET)
            .path("/job")
            .header("apikey", "anon-key")
            .header("authorization", "Bearer anon-key");
        then.status(200).json_body(json!([{"title": "SRE", "min_years_experience": 5}]));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/application")
            .header("apikey", "anon-key");
        then.status(200).json_body(json!([{"job_id": 42}]));
    });

    let job = RestSource::new(server.url(""))
        .with_api_key("anon-key")
        .fetch_job("app-1")
        .await
        .unwrap();

    authed.assert();
    assert_eq!(job.min_years_experience, 5);
    assert!(job.required_skills.is_empty());
}

#[tokio::test]
async fn test_debate_over_rest_source() {
    let server = MockServer::start();
    let application = mock_application(
        &server,
        "app-9",
        json!({
            "name": "Casey",
            "job_id": "job-9",
            "resume_skills": ["rust", "postgres"],
            "years_experience": 6,
            "projects": "Search indexer, Billing service"
        }),
    );
    mock_interview(&server, "app-9", "int-1");
    server.mock(|when, then| {
        when.method(GET).path("/agent");
        then.status(200).json_body(json!([
            {"round": 1, "type": "behavioral", "response": "During the incident there was real tension, so I de-escalated it."}
        ]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/job").query_param("job_id", "eq.job-9");
        then.status(200).json_body(json!([{
            "title": "Platform Engineer",
            "required_skills": ["rust", "postgres"],
            "preferred_skills": "collaboration under pressure"
        }]));
    });

    let config = TomlConfig::from_toml_str(&format!(
        r#"
[debate]
trigger_interval_ms = 10

[source]
type = "rest"
endpoint = "{}"

[target]
candidate_id = "app-9"
job_id = "app-9"
"#,
        server.url("")
    ))
    .unwrap();

    let outcome = DebateEngine::new(RestSource::new(server.url("")), config)
        .run()
        .await
        .unwrap();

    // fetched once for the candidate and once for the job
    application.assert_hits(2);
    let verdict = outcome.verdict().unwrap();
    assert_eq!(verdict.decision, Decision::Hire);
    assert!(verdict
        .pro
        .argument
        .contains("- collaboration under pressure: shown in answer"));
    assert!(verdict.pro.argument.contains("- Billing service"));
}
