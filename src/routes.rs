use actix_web::web;

pub mod auth;
pub mod health;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(auth::configure_routes);
}
