/// `GET /healthz`, `/livez`, `/readyz` -- the process is up and serving.
#[allow(clippy::unused_async)]
pub async fn healthz() -> &'static str {
    "ok"
}
