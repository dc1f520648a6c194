use std::{sync::Arc, time::Duration};

use axum::{
    Json, Router,
    body::Body,
    extract::Path,
    http::{Method, Request, StatusCode},
    routing::get,
};
use http_body_util::BodyExt;
use platform_db::Store;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::{
    cep::CepClient,
    config::AppConfig,
    http::{AppState, build_router},
};

async fn fake_viacep(Path(cep): Path<String>) -> Result<Json<Value>, StatusCode> {
    match cep.as_str() {
        "01001000" => Ok(Json(json!({
            "cep": "01001-000",
            "logradouro": "Praça da Sé",
            "complemento": "lado ímpar",
            "bairro": "Sé",
            "localidade": "São Paulo",
            "uf": "SP",
            "ibge": "3550308"
        }))),
        "99999999" => Ok(Json(json!({ "erro": true }))),
        _ => Err(StatusCode::BAD_GATEWAY),
    }
}

async fn spawn_viacep() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route("/ws/{cep}/json/", get(fake_viacep));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/ws")
}

struct TestApp {
    router: Router,
    store: Store,
}

impl TestApp {
    async fn new() -> Self {
        Self::with_viacep("http://127.0.0.1:9/ws".to_string()).await
    }

    async fn with_viacep(base_url: String) -> Self {
        let store = suite_tests::sqlite_store().await.unwrap();
        let config = AppConfig {
            viacep_base_url: base_url.clone(),
            cep_timeout: Duration::from_secs(2),
            ..AppConfig::default()
        };
        let cep = CepClient::new(base_url, config.cep_timeout).unwrap();
        let state = AppState {
            store: store.clone(),
            cep: Arc::new(cep),
            config: Arc::new(config),
        };
        Self {
            router: build_router(state),
            store,
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body)).await
    }

    async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    async fn create_franchise(&self, nome: &str, cidade: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/franquias",
                json!({
                    "nome": nome,
                    "cidade": cidade,
                    "endereco": "Rua A, 1",
                    "telefone": "(11) 0000-0000",
                    "cep": "01001-000"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }

    async fn create_employee(
        &self,
        nome: &str,
        email: &str,
        salario: Value,
        franquia_id: Option<i64>,
    ) -> (StatusCode, Value) {
        self.post(
            "/api/funcionarios",
            json!({
                "nome": nome,
                "email": email,
                "cargo": "Vendedor",
                "salario": salario,
                "franquiaId": franquia_id
            }),
        )
        .await
    }
}

#[tokio::test]
async fn health_reports_database() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["db_ok"], json!(true));
}

#[tokio::test]
async fn franchise_lifecycle() {
    let app = TestApp::new().await;
    let id = app.create_franchise("Centro", "São Paulo").await;

    let (status, body) = app.get(&format!("/api/franquias/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nome"], json!("Centro"));
    assert_eq!(body["cep"], json!("01001000"));
    assert_eq!(body["_count"]["funcionarios"], json!(0));
    assert_eq!(body["funcionarios"], json!([]));

    let (status, body) = app
        .put(
            &format!("/api/franquias/{id}"),
            json!({
                "nome": "Centro Novo",
                "cidade": "Campinas",
                "endereco": "Rua B, 2",
                "telefone": "(19) 0000-0000"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cidade"], json!("Campinas"));
    assert_eq!(body["cep"], Value::Null);

    let (status, body) = app.delete(&format!("/api/franquias/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Franquia deletada com sucesso"}));

    let (status, body) = app.get(&format!("/api/franquias/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("Franquia não encontrada"));
}

#[tokio::test]
async fn franchise_validation_errors() {
    let app = TestApp::new().await;
    let (status, body) = app
        .post("/api/franquias", json!({"nome": "Sem cidade"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"error": "Todos os campos são obrigatórios", "code": "INVALID_INPUT"})
    );

    let (status, body) = app
        .post(
            "/api/franquias",
            json!({
                "nome": "X",
                "cidade": "Y",
                "endereco": "Z",
                "telefone": "1",
                "cep": "123"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("O campo CEP deve conter 8 dígitos"));

    let (status, body) = app.get("/api/franquias/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("ID inválido"));
}

#[tokio::test]
async fn update_checks_existence_before_validation() {
    let app = TestApp::new().await;
    let (status, body) = app.put("/api/franquias/999", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("Franquia não encontrada"));

    let (status, body) = app.put("/api/funcionarios/999", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("Funcionário não encontrado"));
}

#[tokio::test]
async fn franchise_with_employees_cannot_be_deleted() {
    let app = TestApp::new().await;
    let id = app.create_franchise("Centro", "São Paulo").await;
    let (status, _) = app
        .create_employee("Ana", "ana@example.com", json!(2500.5), Some(id))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.delete(&format!("/api/franquias/{id}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        json!("Não é possível deletar franquia com funcionários vinculados")
    );

    let (_, body) = app.get("/api/franquias").await;
    assert_eq!(body[0]["_count"]["funcionarios"], json!(1));
    assert_eq!(body[0]["funcionarios"][0]["email"], json!("ana@example.com"));
}

#[tokio::test]
async fn employee_lifecycle() {
    let app = TestApp::new().await;
    let franchise = app.create_franchise("Centro", "São Paulo").await;

    let (status, body) = app
        .create_employee("Ana", "ana@example.com", json!("2500.50"), Some(franchise))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["salario"], json!(2500.5));
    assert_eq!(body["franquiaId"], json!(franchise));
    assert_eq!(body["franquia"]["nome"], json!("Centro"));
    let id = body["id"].as_i64().unwrap();

    let (status, body) = app
        .put(
            &format!("/api/funcionarios/{id}"),
            json!({
                "nome": "Ana Maria",
                "email": "ana@example.com",
                "cargo": "Gerente",
                "salario": 4000
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["cargo"], json!("Gerente"));
    assert_eq!(body["franquia"], Value::Null);

    let (_, list) = app.get("/api/funcionarios").await;
    assert_eq!(list.as_array().map(Vec::len), Some(1));

    let (status, body) = app.delete(&format!("/api/funcionarios/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Funcionário deletado com sucesso"}));

    let (status, _) = app.delete(&format!("/api/funcionarios/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn employee_rules() {
    let app = TestApp::new().await;

    let (status, body) = app
        .create_employee("Ana", "ana@example.com", json!("abc"), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Salário inválido"));

    let (status, body) = app
        .create_employee("Ana", "ana@example.com", json!(10_000_000_000u64), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Salário inválido"));

    let (status, body) = app
        .create_employee("Ana", "ana@example.com", json!(1000), Some(42))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("Franquia não encontrada"));

    let (status, _) = app
        .create_employee("Ana", "ana@example.com", json!(0), None)
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .create_employee("Outra Ana", "ana@example.com", json!(1000), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Email já está em uso"));

    let (_, bruno) = app
        .create_employee("Bruno", "bruno@example.com", json!(1000), None)
        .await;
    let bruno_id = bruno["id"].as_i64().unwrap();
    let (status, body) = app
        .put(
            &format!("/api/funcionarios/{bruno_id}"),
            json!({
                "nome": "Bruno",
                "email": "ana@example.com",
                "cargo": "Vendedor",
                "salario": 1000
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        json!("Email já está em uso por outro funcionário")
    );
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let app = TestApp::new().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/funcionarios")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dashboard_aggregates_stored_data() {
    let app = TestApp::new().await;
    let centro = app.create_franchise("Centro", "São Paulo").await;
    app.create_franchise("Vazia", "São Paulo").await;
    app.create_employee("Ana", "ana@example.com", json!(2000), Some(centro))
        .await;
    app.create_employee("Bruno", "bruno@example.com", json!(3000), None)
        .await;

    let (status, body) = app.get("/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalFranquias"], json!(2));
    assert_eq!(body["totalFuncionarios"], json!(2));
    assert_eq!(body["salarioMedio"], json!(2500.0));
    assert_eq!(body["folhaTotal"], json!(5000.0));
    assert_eq!(
        body["franquiasPorCidade"],
        json!([{"cidade": "São Paulo", "total": 2}])
    );
    assert_eq!(body["franquiasSemFuncionarios"][0]["nome"], json!("Vazia"));
    assert_eq!(body["funcionariosSemFranquia"][0]["nome"], json!("Bruno"));
    assert_eq!(body["ultimosFuncionarios"][0]["nome"], json!("Bruno"));
}

#[tokio::test]
async fn dashboard_fails_whole_when_storage_is_gone() {
    let app = TestApp::new().await;
    app.store.clone().close().await.unwrap();
    let (status, body) = app.get("/api/dashboard").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"error": "Erro interno do servidor", "code": "INTERNAL"})
    );
}

#[tokio::test]
async fn cep_lookup_against_fake_viacep() {
    let app = TestApp::with_viacep(spawn_viacep().await).await;

    let (status, body) = app.get("/api/viacep/01001-000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "cep": "01001-000",
            "logradouro": "Praça da Sé",
            "complemento": "lado ímpar",
            "bairro": "Sé",
            "localidade": "São Paulo",
            "uf": "SP"
        })
    );

    let (status, body) = app.get("/api/viacep/99999999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("CEP não encontrado"));

    let (status, body) = app.get("/api/viacep/12345678").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("Erro ao consultar o CEP"));

    let (status, body) = app.get("/api/viacep/123").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("O campo CEP deve conter 8 dígitos"));
}
