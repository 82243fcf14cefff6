//! Handlers for the `/api/users` routes.
//!
//! All three handlers answer 200. Application logic never produces an error
//! status: an absent record degrades to an empty list and a create request
//! with missing fields is stored with those fields absent.

use log::debug;
use serde::Serialize;

use crate::http::{Error, HttpRequest, HttpResponse, HttpServer, Method, StatusCode};
use crate::store::{User, UserStore};

/// A created record as returned by the create endpoint: the stored fields
/// plus the derived `user_id`.
#[derive(Debug, Serialize)]
pub struct CreatedUser {
    #[serde(flatten)]
    pub user: User,
    pub user_id: usize,
}

/// `GET /api/users` — the full store as a JSON array of raw records, in
/// insertion order. Records carry no `user_id` in this view.
pub async fn list_users(store: UserStore) -> Result<HttpResponse, Error> {
    let users = store.all().await;
    HttpResponse::new(StatusCode::Ok).with_json(&users)
}

/// `GET /api/users/:user_id` — the record at that index.
///
/// An out-of-range or non-numeric index answers with the empty list `[]`,
/// still status 200, rather than an error.
pub async fn get_user(req: HttpRequest, store: UserStore) -> Result<HttpResponse, Error> {
    let user = match req
        .get_path_param("user_id")
        .and_then(|raw| raw.parse::<usize>().ok())
    {
        Some(index) => store.get(index).await,
        None => None,
    };

    match user {
        Some(user) => HttpResponse::new(StatusCode::Ok).with_json(&user),
        None => HttpResponse::new(StatusCode::Ok).with_json(&Vec::<User>::new()),
    }
}

/// `POST /api/users` — append a record and answer with it plus its
/// derived `user_id` (the store length minus one).
///
/// The `username`, `real_name` and `country` fields are taken from the JSON
/// body when the request carries one, otherwise from the query string. Any
/// subset may be present; extra fields are ignored and nothing is validated.
pub async fn create_user(req: HttpRequest, store: UserStore) -> Result<HttpResponse, Error> {
    let user = if req.is_json() && !req.body.is_empty() {
        req.json::<User>()?
    } else {
        user_from_query(&req)
    };

    let user_id = store.append(user.clone()).await;
    debug!("created user {user_id}");

    HttpResponse::new(StatusCode::Ok).with_json(&CreatedUser { user, user_id })
}

fn user_from_query(req: &HttpRequest) -> User {
    User {
        username: req.get_query_param("username").cloned(),
        real_name: req.get_query_param("real_name").cloned(),
        country: req.get_query_param("country").cloned(),
    }
}

/// Register the users routes on `server`, cloning the store handle into
/// each handler.
pub async fn register_routes(server: &HttpServer, store: UserStore) {
    let list_store = store.clone();
    server
        .add_route("/api/users", vec![Method::GET], move |_req| {
            let store = list_store.clone();
            async move { list_users(store).await }
        })
        .await;

    let get_store = store.clone();
    server
        .add_route("/api/users/:user_id", vec![Method::GET], move |req| {
            let store = get_store.clone();
            async move { get_user(req, store).await }
        })
        .await;

    server
        .add_route("/api/users", vec![Method::POST], move |req| {
            let store = store.clone();
            async move { create_user(req, store).await }
        })
        .await;
}
