// trace-client/tests/common/mod.rs
// In-process fake of the trace backend for integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::{Value, json};
use trace_client::{ClientConfig, Event, EventType, Product, ProductTrace, TraceClient};

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Default)]
struct Data {
    users: Vec<User>,
    products: Vec<Product>,
    events: HashMap<i64, Vec<Event>>,
    next_event_id: i64,
}

/// Shared state of the fake backend
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    data: Arc<Mutex<Data>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user directly, bypassing `/register`
    pub fn add_user(&self, username: &str, password: &str) -> i64 {
        let mut data = self.data.lock().unwrap();
        let id = data.users.len() as i64 + 1;
        data.users.push(User {
            id,
            username: username.to_string(),
            password: password.to_string(),
            role: "FARMER".to_string(),
        });
        id
    }

    pub fn user(&self, username: &str) -> Option<User> {
        let data = self.data.lock().unwrap();
        data.users.iter().find(|u| u.username == username).cloned()
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/register", post(register))
            .route("/api/protected/data", get(protected_data))
            .route("/api/products", get(list_products).post(create_product))
            .route("/api/products/{id}/log-event", post(log_event))
            .route("/api/products/{id}/handover", post(handover))
            .route("/api/products/{id}/trace", get(trace))
            .route("/api/products/{id}/qrcode-data", get(qrcode_data))
            .with_state(self.clone())
    }

    /// Serve on an ephemeral port and return the API base URL
    pub async fn spawn(&self) -> String {
        serve(self.router()).await
    }
}

/// Serve any router on an ephemeral port and return the API base URL
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

/// A backend that answers every request with the same status and body
pub async fn spawn_fixed(status: StatusCode, body: &'static str) -> String {
    serve(Router::new().fallback(move || async move { (status, body) })).await
}

/// An address nothing listens on
pub async fn dead_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

/// Client with an in-memory session
pub fn client(base_url: &str) -> TraceClient {
    TraceClient::from_config(&ClientConfig::new(base_url).with_timeout(5)).unwrap()
}

fn message(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message, "status": status.as_u16() }))).into_response()
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Basic realm=\"trace\"")],
    )
        .into_response()
}

fn authenticate(backend: &FakeBackend, headers: &HeaderMap) -> Result<User, Response> {
    let encoded = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Basic "))
        .ok_or_else(unauthorized)?;
    let decoded = STANDARD.decode(encoded).map_err(|_| unauthorized())?;
    let decoded = String::from_utf8(decoded).map_err(|_| unauthorized())?;
    let (username, password) = decoded.split_once(':').ok_or_else(unauthorized)?;

    backend
        .user(username)
        .filter(|u| u.password == password)
        .ok_or_else(unauthorized)
}

#[derive(Deserialize)]
struct RegisterBody {
    username: String,
    password: String,
    role: String,
}

async fn register(State(backend): State<FakeBackend>, Json(body): Json<RegisterBody>) -> Response {
    if backend.user(&body.username).is_some() {
        return (StatusCode::BAD_REQUEST, "Username is already taken!").into_response();
    }
    let id = backend.add_user(&body.username, &body.password);
    backend.data.lock().unwrap().users[(id - 1) as usize].role = body.role;
    (StatusCode::OK, "User registered successfully!").into_response()
}

async fn protected_data(State(backend): State<FakeBackend>, headers: HeaderMap) -> Response {
    match authenticate(&backend, &headers) {
        Ok(user) => format!("Hello, {}", user.username).into_response(),
        Err(resp) => resp,
    }
}

async fn list_products(State(backend): State<FakeBackend>, headers: HeaderMap) -> Response {
    let user = match authenticate(&backend, &headers) {
        Ok(user) => user,
        Err(resp) => return resp,
    };
    let data = backend.data.lock().unwrap();
    let owned: Vec<Product> = data
        .products
        .iter()
        .filter(|p| p.owner_user_id == user.id)
        .cloned()
        .collect();
    Json(owned).into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBody {
    name: String,
    origin: String,
    initial_location: String,
}

async fn create_product(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Json(body): Json<CreateBody>,
) -> Response {
    let user = match authenticate(&backend, &headers) {
        Ok(user) => user,
        Err(resp) => return resp,
    };
    let mut data = backend.data.lock().unwrap();
    let product = Product {
        id: data.products.len() as i64 + 1,
        name: body.name,
        origin: body.origin,
        current_status: "CREATED".to_string(),
        current_location: body.initial_location,
        created_date: chrono::Local::now().naive_local(),
        owner_user_id: user.id,
    };
    data.products.push(product.clone());
    Json(product).into_response()
}

async fn log_event(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let user = match authenticate(&backend, &headers) {
        Ok(user) => user,
        Err(resp) => return resp,
    };
    let Some(event_type) = body["eventType"]
        .as_str()
        .and_then(|s| serde_json::from_value::<EventType>(json!(s)).ok())
    else {
        return message(StatusCode::BAD_REQUEST, "Invalid event type");
    };

    let mut data = backend.data.lock().unwrap();
    let Some(product) = data.products.iter_mut().find(|p| p.id == id) else {
        return message(StatusCode::NOT_FOUND, "Product not found");
    };
    let location = body["location"].as_str().unwrap_or_default().to_string();
    product.current_status = event_type.as_str().to_string();
    product.current_location = location.clone();

    data.next_event_id += 1;
    let event = Event {
        id: data.next_event_id,
        event_type,
        event_description: body["eventDescription"].as_str().unwrap_or_default().to_string(),
        location,
        timestamp: chrono::Local::now().naive_local(),
        // always the authenticated principal, whatever the body says
        actor_user_id: user.id,
    };
    data.events.entry(id).or_default().push(event.clone());
    Json(event).into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HandoverBody {
    new_owner_user_id: i64,
    handover_location: String,
    handover_description: String,
}

async fn handover(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<HandoverBody>,
) -> Response {
    let user = match authenticate(&backend, &headers) {
        Ok(user) => user,
        Err(resp) => return resp,
    };
    let mut data = backend.data.lock().unwrap();
    if !data.users.iter().any(|u| u.id == body.new_owner_user_id) {
        return message(StatusCode::BAD_REQUEST, "New owner not found");
    }
    let Some(product) = data.products.iter_mut().find(|p| p.id == id) else {
        return message(StatusCode::NOT_FOUND, "Product not found");
    };
    if product.owner_user_id != user.id {
        return message(
            StatusCode::FORBIDDEN,
            "Only the current owner can hand over this product",
        );
    }
    product.owner_user_id = body.new_owner_user_id;
    product.current_location = body.handover_location.clone();

    data.next_event_id += 1;
    let event = Event {
        id: data.next_event_id,
        event_type: EventType::Received,
        event_description: body.handover_description,
        location: body.handover_location,
        timestamp: chrono::Local::now().naive_local(),
        actor_user_id: user.id,
    };
    data.events.entry(id).or_default().push(event);
    (StatusCode::OK, "Product handed over successfully").into_response()
}

async fn trace(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = authenticate(&backend, &headers) {
        return resp;
    }
    let data = backend.data.lock().unwrap();
    let Some(product) = data.products.iter().find(|p| p.id == id) else {
        return message(StatusCode::NOT_FOUND, "Product not found");
    };
    Json(ProductTrace {
        product: product.clone(),
        event_history: data.events.get(&id).cloned().unwrap_or_default(),
    })
    .into_response()
}

async fn qrcode_data(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = authenticate(&backend, &headers) {
        return resp;
    }
    let data = backend.data.lock().unwrap();
    if !data.products.iter().any(|p| p.id == id) {
        return message(StatusCode::NOT_FOUND, "Product not found");
    }
    Json(json!({ "qrCodeData": id.to_string() })).into_response()
}
