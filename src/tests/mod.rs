//! tests/mod.rs
//! Pruebas de endpoints y servicios contra un backend en memoria.

/// App de actix con los servicios dados y todas las rutas.
macro_rules! iniciar_app {
    ($servicios:expr) => {{
        let servicios = $servicios.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .configure(|cfg| servicios.registrar(cfg))
                .configure(crate::app::init_app),
        )
        .await
    }};
}

mod servicios_tests;
mod support;
