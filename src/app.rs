//! app.rs
use actix_web::{web, HttpRequest};

use crate::errors::AppError;
use crate::handlers::{
    abono_handler, analytics_handler, auth_handler, catalogo_handler, cron_handler,
    ocupacion_handler, playa_handler, playero_handler, plaza_handler, revalidate_handler,
    tarifa_handler, turno_handler,
};
use crate::services::abono_service::AbonoService;
use crate::services::analytics_service::AnalyticsService;
use crate::services::auth_service::AuthService;
use crate::services::cache_service::CacheService;
use crate::services::catalogo_service::CatalogoService;
use crate::services::cron_run_service::CronRunService;
use crate::services::cron_service::CronService;
use crate::services::ocupacion_service::OcupacionService;
use crate::services::playa_service::PlayaService;
use crate::services::playero_service::PlayeroService;
use crate::services::plaza_service::PlazaService;
use crate::services::supabase_service::SharedBackend;
use crate::services::tarifa_service::TarifaService;
use crate::services::turno_service::TurnoService;

/// Todos los servicios de la app, armados sobre el mismo backend y cache.
#[derive(Clone)]
pub struct Servicios {
    pub cache: CacheService,
    pub auth: AuthService,
    pub playas: PlayaService,
    pub plazas: PlazaService,
    pub tarifas: TarifaService,
    pub abonos: AbonoService,
    pub ocupaciones: OcupacionService,
    pub turnos: TurnoService,
    pub playeros: PlayeroService,
    pub analytics: AnalyticsService,
    pub catalogo: CatalogoService,
    pub cron: CronService,
}

impl Servicios {
    pub fn new(
        db: SharedBackend,
        cache: CacheService,
        cron_runs: CronRunService,
        cron_secret: Option<String>,
    ) -> Self {
        Servicios {
            auth: AuthService::new(db.clone()),
            playas: PlayaService::new(db.clone(), cache.clone()),
            plazas: PlazaService::new(db.clone(), cache.clone()),
            tarifas: TarifaService::new(db.clone(), cache.clone()),
            abonos: AbonoService::new(db.clone(), cache.clone()),
            ocupaciones: OcupacionService::new(db.clone(), cache.clone()),
            turnos: TurnoService::new(db.clone(), cache.clone()),
            playeros: PlayeroService::new(db.clone(), cache.clone()),
            analytics: AnalyticsService::new(db.clone(), cache.clone()),
            catalogo: CatalogoService::new(db.clone(), cache.clone()),
            cron: CronService::new(db, cron_runs, cache.clone(), cron_secret),
            cache,
        }
    }

    /// Registra cada servicio como `web::Data`.
    pub fn registrar(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.cache.clone()))
            .app_data(web::Data::new(self.auth.clone()))
            .app_data(web::Data::new(self.playas.clone()))
            .app_data(web::Data::new(self.plazas.clone()))
            .app_data(web::Data::new(self.tarifas.clone()))
            .app_data(web::Data::new(self.abonos.clone()))
            .app_data(web::Data::new(self.ocupaciones.clone()))
            .app_data(web::Data::new(self.turnos.clone()))
            .app_data(web::Data::new(self.playeros.clone()))
            .app_data(web::Data::new(self.analytics.clone()))
            .app_data(web::Data::new(self.catalogo.clone()))
            .app_data(web::Data::new(self.cron.clone()));
    }
}

// Los errores de deserialización también salen con el sobre `{data, error}`.
fn error_de_json(err: actix_web::error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::validacion("body", format!("Cuerpo inválido: {}", err)).into()
}

fn error_de_query(err: actix_web::error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::validacion("query", format!("Parámetros inválidos: {}", err)).into()
}

fn error_de_path(err: actix_web::error::PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::validacion("path", format!("Ruta inválida: {}", err)).into()
}

pub fn init_app(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error_de_json))
        .app_data(web::QueryConfig::default().error_handler(error_de_query))
        .app_data(web::PathConfig::default().error_handler(error_de_path))
        .service(
            web::scope("/api")
                .route("/me", web::get().to(auth_handler::me_endpoint))
                .service(
                    web::scope("/playas")
                        .route("", web::get().to(playa_handler::list_playas_endpoint))
                        .route("", web::post().to(playa_handler::create_playa_endpoint))
                        .route("/{playa_id}", web::get().to(playa_handler::get_playa_endpoint))
                        .route(
                            "/{playa_id}",
                            web::put().to(playa_handler::update_playa_endpoint),
                        )
                        .route(
                            "/{playa_id}",
                            web::delete().to(playa_handler::delete_playa_endpoint),
                        )
                        .route(
                            "/{playa_id}/estado",
                            web::patch().to(playa_handler::change_playa_estado_endpoint),
                        )
                        .route(
                            "/{playa_id}/plazas",
                            web::get().to(plaza_handler::list_plazas_endpoint),
                        )
                        .route(
                            "/{playa_id}/plazas",
                            web::post().to(plaza_handler::create_plaza_endpoint),
                        )
                        .route(
                            "/{playa_id}/tarifas",
                            web::get().to(tarifa_handler::list_tarifas_endpoint),
                        )
                        .route(
                            "/{playa_id}/tarifas",
                            web::put().to(tarifa_handler::save_tarifa_endpoint),
                        )
                        .route(
                            "/{playa_id}/tarifas",
                            web::delete().to(tarifa_handler::delete_tarifa_endpoint),
                        )
                        .route(
                            "/{playa_id}/abonos",
                            web::get().to(abono_handler::list_abonos_endpoint),
                        )
                        .route(
                            "/{playa_id}/ocupaciones",
                            web::get().to(ocupacion_handler::list_ocupaciones_endpoint),
                        )
                        .route(
                            "/{playa_id}/turnos",
                            web::get().to(turno_handler::list_turnos_endpoint),
                        ),
                )
                .service(
                    web::scope("/plazas")
                        .route(
                            "/{plaza_id}",
                            web::put().to(plaza_handler::update_plaza_endpoint),
                        )
                        .route(
                            "/{plaza_id}",
                            web::delete().to(plaza_handler::delete_plaza_endpoint),
                        ),
                )
                .service(
                    web::scope("/abonos")
                        .route("", web::post().to(abono_handler::create_abono_endpoint))
                        .route(
                            "/{abono_id}/finalizar",
                            web::post().to(abono_handler::finish_abono_endpoint),
                        )
                        .route(
                            "/{abono_id}/boletas",
                            web::get().to(abono_handler::list_boletas_endpoint),
                        ),
                )
                .route(
                    "/boletas/{boleta_id}/pagos",
                    web::post().to(abono_handler::pay_boleta_endpoint),
                )
                .service(
                    web::scope("/ocupaciones")
                        .route(
                            "",
                            web::post().to(ocupacion_handler::create_ocupacion_endpoint),
                        )
                        .route(
                            "/{ocupacion_id}/finalizar",
                            web::post().to(ocupacion_handler::finish_ocupacion_endpoint),
                        )
                        .route(
                            "/{ocupacion_id}/metodo-pago",
                            web::patch().to(ocupacion_handler::change_metodo_pago_endpoint),
                        ),
                )
                .service(
                    web::scope("/turnos")
                        .route("", web::post().to(turno_handler::start_turno_endpoint))
                        .route("/activo", web::get().to(turno_handler::active_turno_endpoint))
                        .route(
                            "/activo/finalizar",
                            web::post().to(turno_handler::finish_turno_endpoint),
                        )
                        .route(
                            "/{turno_id}/recaudacion",
                            web::get().to(turno_handler::turno_recaudacion_endpoint),
                        ),
                )
                .service(
                    web::scope("/playeros")
                        .route("", web::get().to(playero_handler::list_playeros_endpoint))
                        .route(
                            "/invitaciones",
                            web::post().to(playero_handler::create_invitacion_endpoint),
                        )
                        .route(
                            "/invitaciones",
                            web::delete().to(playero_handler::delete_invitacion_endpoint),
                        )
                        .route(
                            "/invitaciones/aceptar",
                            web::post().to(playero_handler::accept_invitacion_endpoint),
                        )
                        .route(
                            "/{playero_id}/estado",
                            web::patch().to(playero_handler::change_playero_estado_endpoint),
                        )
                        .route(
                            "/{playero_id}/playas",
                            web::put().to(playero_handler::assign_playas_endpoint),
                        ),
                )
                .service(
                    web::scope("/analytics")
                        .route(
                            "/recaudacion",
                            web::get().to(analytics_handler::recaudacion_endpoint),
                        )
                        .route(
                            "/ocupacion",
                            web::get().to(analytics_handler::ocupacion_endpoint),
                        )
                        .route("/resumen", web::get().to(analytics_handler::resumen_endpoint)),
                )
                .route(
                    "/ciudades",
                    web::get().to(catalogo_handler::list_ciudades_endpoint),
                )
                .route(
                    "/caracteristicas",
                    web::get().to(catalogo_handler::list_caracteristicas_endpoint),
                )
                .route(
                    "/vehiculos/{patente}",
                    web::get().to(catalogo_handler::get_vehiculo_endpoint),
                )
                .service(
                    web::scope("/cron")
                        .route("/boletas", web::post().to(cron_handler::run_boletas_endpoint))
                        .route("/runs", web::get().to(cron_handler::list_runs_endpoint))
                        .route("/runs/{id}", web::get().to(cron_handler::get_run_endpoint)),
                )
                .route(
                    "/revalidate",
                    web::post().to(revalidate_handler::revalidate_endpoint),
                ),
        );
}
