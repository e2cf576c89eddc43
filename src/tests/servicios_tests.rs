//! tests/servicios_tests.rs
//! Servicios llamados directamente sobre el backend en memoria.

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use serde_json::json;
    use uuid::Uuid;

    use crate::errors::AppError;
    use crate::models::abono_model::{
        CrearAbonoRequest, EstadoBoleta, RegistrarPagoBoletaRequest, VehiculoAbono,
    };
    use crate::models::auth_model::{Rol, UsuarioAutenticado};
    use crate::models::comun_model::{MetodoPago, TipoVehiculo};
    use crate::models::ocupacion_model::FinalizarOcupacionRequest;
    use crate::models::playero_model::{
        AceptarInvitacionRequest, AsignarPlayasRequest, CambiarEstadoPlayeroRequest,
        CrearInvitacionRequest, EstadoPlayero,
    };
    use crate::models::plaza_model::ActualizarPlazaRequest;
    use crate::services::cache_service::CacheTag;
    use crate::tests::support::{
        dueno_id, etiquetas_invalidadas, playero_id, sembrar_cache, servicios, FakeBackend,
        Llamada, TOKEN_DUENO, TOKEN_PLAYERO,
    };
    use crate::utils::fechas::texto_utc;

    fn dueno() -> UsuarioAutenticado {
        UsuarioAutenticado {
            usuario_id: dueno_id(),
            email: "duena@playas.com".into(),
            nombre: Some("Marta".into()),
            roles: vec![Rol::Dueno],
            token: TOKEN_DUENO.into(),
        }
    }

    fn llamada_rpc(fake: &FakeBackend, funcion: &str) -> Llamada {
        fake.llamadas()
            .into_iter()
            .find(|l| l.operacion == "rpc" && l.nombre == funcion)
            .unwrap()
    }

    fn playero() -> UsuarioAutenticado {
        UsuarioAutenticado {
            usuario_id: playero_id(),
            email: "playero@playas.com".into(),
            nombre: None,
            roles: vec![Rol::Playero],
            token: TOKEN_PLAYERO.into(),
        }
    }

    #[actix_rt::test]
    async fn auth_guarda_el_token_en_el_usuario() {
        let fake = FakeBackend::new();
        let servicios = servicios(fake.clone(), None).await;

        let usuario = servicios.auth.usuario_desde_token(TOKEN_DUENO).await.unwrap();
        assert_eq!(usuario.usuario_id, dueno_id());
        assert!(usuario.tiene_rol(Rol::Dueno));
        assert_eq!(usuario.token(), Some(TOKEN_DUENO));

        let err = servicios.auth.usuario_desde_token("vencido").await.unwrap_err();
        assert!(matches!(err, AppError::NoAutenticado(_)));
    }

    #[actix_rt::test]
    async fn alta_de_abono_manda_el_monto_prorrateado() {
        let fake = FakeBackend::new();
        let abono_id = Uuid::new_v4();
        fake.con_rpc(
            "crear_abono",
            json!([{ "abono_id": abono_id, "boleta_id": Uuid::new_v4() }]),
        );
        let servicios = servicios(fake.clone(), None).await;

        let req = CrearAbonoRequest {
            playa_id: Uuid::new_v4(),
            plaza_id: Uuid::new_v4(),
            nombre: "Ana".into(),
            apellido: "Gómez".into(),
            dni: "30123456".into(),
            email: Some("Ana@Mail.com".into()),
            telefono: None,
            vehiculos: vec![VehiculoAbono {
                patente: "abc123".into(),
                tipo_vehiculo: TipoVehiculo::Automovil,
            }],
            fecha_inicio: None,
            precio_mensual: 31000.0,
            metodo_pago: MetodoPago::Transferencia,
        };
        let creado = servicios.abonos.crear(&dueno(), req).await.unwrap();
        assert_eq!(creado.abono_id, abono_id);
        assert!(creado.monto_inicial > 0.0 && creado.monto_inicial <= 31000.0);

        let llamada = fake
            .llamadas()
            .into_iter()
            .find(|l| l.nombre == "crear_abono")
            .unwrap();
        assert_eq!(llamada.params["p_monto_inicial"], creado.monto_inicial);
        assert_eq!(llamada.params["p_email"], "ana@mail.com");
        assert_eq!(llamada.params["p_metodo_pago"], "TRANSFERENCIA");
    }

    #[actix_rt::test]
    async fn resumen_junta_recaudacion_y_ocupacion() {
        let fake = FakeBackend::new();
        let playa_id = Uuid::new_v4();
        let ayer = texto_utc(Utc::now() - Duration::days(1));
        let hace_dos_meses = texto_utc(Utc::now() - Duration::days(60));
        fake.con_filas(
            "v_recaudacion",
            vec![
                json!({ "playa_id": playa_id, "fecha": ayer, "monto": 1200.0, "metodo_pago": "EFECTIVO", "origen": "OCUPACION" }),
                json!({ "playa_id": playa_id, "fecha": ayer, "monto": 800.0, "metodo_pago": "TARJETA", "origen": "OCUPACION" }),
                json!({ "playa_id": playa_id, "fecha": hace_dos_meses, "monto": 5000.0, "metodo_pago": "EFECTIVO", "origen": "BOLETA" }),
                json!({ "playa_id": Uuid::new_v4(), "fecha": ayer, "monto": 99.0, "metodo_pago": "EFECTIVO", "origen": "OCUPACION" }),
            ],
        );
        fake.con_filas(
            "v_plazas_estado",
            vec![
                json!({ "plaza_id": Uuid::new_v4(), "playa_id": playa_id, "ocupada": true }),
                json!({ "plaza_id": Uuid::new_v4(), "playa_id": playa_id, "ocupada": false }),
                json!({ "plaza_id": Uuid::new_v4(), "playa_id": playa_id, "ocupada": false, "habilitada": false }),
            ],
        );
        let servicios = servicios(fake.clone(), None).await;

        let resumen = servicios.analytics.resumen(&dueno(), playa_id).await.unwrap();
        assert_eq!(resumen.recaudacion.total, 2000.0);
        assert_eq!(resumen.recaudacion.cantidad, 2);
        assert_eq!(resumen.recaudacion.ticket_promedio, 1000.0);
        assert_eq!(resumen.ocupacion.total_plazas, 3);
        assert_eq!(resumen.ocupacion.suspendidas, 1);
        assert_eq!(resumen.ocupacion.porcentaje_ocupacion, 50.0);
    }

    #[actix_rt::test]
    async fn recaudacion_es_solo_para_duenos() {
        let fake = FakeBackend::new();
        let servicios = servicios(fake.clone(), None).await;
        let err = servicios
            .analytics
            .resumen(&playero(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Prohibido(_)));
    }

    #[actix_rt::test]
    async fn invitacion_necesita_al_menos_una_playa() {
        let fake = FakeBackend::new();
        fake.con_rpc("crear_invitacion_playero", json!(null));
        let servicios = servicios(fake.clone(), None).await;

        let req = CrearInvitacionRequest {
            email: "nuevo@playas.com".into(),
            nombre: "Nuevo".into(),
            playas_ids: vec![],
        };
        let err = servicios.playeros.invitar(&dueno(), req).await.unwrap_err();
        assert!(matches!(err, AppError::Validacion { ref campo, .. } if campo == "playas_ids"));
        assert!(fake.rpcs_llamadas().is_empty());

        let req = CrearInvitacionRequest {
            email: " Nuevo@Playas.com ".into(),
            nombre: "Nuevo".into(),
            playas_ids: vec![Uuid::new_v4()],
        };
        servicios.playeros.invitar(&dueno(), req).await.unwrap();
        let llamada = fake
            .llamadas()
            .into_iter()
            .find(|l| l.nombre == "crear_invitacion_playero")
            .unwrap();
        assert_eq!(llamada.params["p_email"], "nuevo@playas.com");
    }

    #[actix_rt::test]
    async fn estado_pendiente_no_se_asigna_a_mano() {
        let fake = FakeBackend::new();
        let servicios = servicios(fake.clone(), None).await;
        let err = servicios
            .playeros
            .cambiar_estado(
                &dueno(),
                playero_id(),
                CambiarEstadoPlayeroRequest {
                    estado: EstadoPlayero::Pendiente,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validacion { .. }));
        assert_eq!(fake.cantidad("update", "playero_playa"), 0);
    }

    #[actix_rt::test]
    async fn suspender_playero_actualiza_sus_asignaciones() {
        let fake = FakeBackend::new();
        fake.con_filas(
            "playero_playa",
            vec![
                json!({ "playero_id": playero_id(), "dueno_id": dueno_id(), "playa_id": Uuid::new_v4(), "estado": "ACTIVO" }),
                json!({ "playero_id": playero_id(), "dueno_id": dueno_id(), "playa_id": Uuid::new_v4(), "estado": "ACTIVO" }),
            ],
        );
        let servicios = servicios(fake.clone(), None).await;
        servicios
            .playeros
            .cambiar_estado(
                &dueno(),
                playero_id(),
                CambiarEstadoPlayeroRequest {
                    estado: EstadoPlayero::Suspendido,
                },
            )
            .await
            .unwrap();
        assert!(fake
            .filas("playero_playa")
            .iter()
            .all(|f| f["estado"] == "SUSPENDIDO"));
    }

    #[actix_rt::test]
    async fn edicion_de_plaza_sin_cambios_es_rechazada() {
        let fake = FakeBackend::new();
        let servicios = servicios(fake.clone(), None).await;
        let err = servicios
            .plazas
            .actualizar(
                &dueno(),
                Uuid::new_v4(),
                ActualizarPlazaRequest {
                    tipo_plaza_id: None,
                    identificador: None,
                    estado: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err, AppError::validacion("plaza", "No hay cambios para guardar"));
    }

    #[actix_rt::test]
    async fn vehiculo_se_busca_por_patente_normalizada() {
        let fake = FakeBackend::new();
        fake.con_filas(
            "vehiculo",
            vec![json!({ "patente": "AB123CD", "tipo_vehiculo": "MOTOCICLETA" })],
        );
        let servicios = servicios(fake.clone(), None).await;

        let vehiculo = servicios.catalogo.vehiculo(&playero(), "ab 123 cd").await.unwrap();
        assert_eq!(vehiculo.tipo_vehiculo, TipoVehiculo::Motocicleta);

        let err = servicios.catalogo.vehiculo(&playero(), "AC456DE").await.unwrap_err();
        assert!(matches!(err, AppError::NoEncontrado(_)));
    }

    #[actix_rt::test]
    async fn catalogo_se_cachea() {
        let fake = FakeBackend::new();
        fake.con_filas(
            "ciudad",
            vec![json!({ "ciudad_id": 1, "nombre": "Córdoba", "provincia": "Córdoba" })],
        );
        let servicios = servicios(fake.clone(), None).await;

        for _ in 0..2 {
            let ciudades = servicios.catalogo.ciudades(&playero()).await.unwrap();
            assert_eq!(ciudades.len(), 1);
        }
        assert_eq!(fake.cantidad("select", "ciudad"), 1);
    }

    #[actix_rt::test]
    async fn eliminar_plaza_llama_delete_plaza() {
        let fake = FakeBackend::new();
        fake.con_rpc("delete_plaza", json!(null));
        let servicios = servicios(fake.clone(), None).await;
        let plaza_id = Uuid::new_v4();

        let err = servicios.plazas.eliminar(&playero(), plaza_id).await.unwrap_err();
        assert!(matches!(err, AppError::Prohibido(_)));
        assert!(fake.rpcs_llamadas().is_empty());

        sembrar_cache(&servicios.cache).await;
        servicios.plazas.eliminar(&dueno(), plaza_id).await.unwrap();
        let llamada = llamada_rpc(&fake, "delete_plaza");
        assert_eq!(llamada.params, json!({ "p_plaza_id": plaza_id }));
        assert_eq!(llamada.token.as_deref(), Some(TOKEN_DUENO));
        assert_eq!(
            etiquetas_invalidadas(&servicios.cache).await,
            vec![CacheTag::Plazas, CacheTag::Ocupaciones]
        );
    }

    #[actix_rt::test]
    async fn egreso_llama_finalizar_ocupacion() {
        let fake = FakeBackend::new();
        let ocupacion_id = Uuid::new_v4();
        let ahora = Utc::now();
        fake.con_rpc(
            "finalizar_ocupacion",
            json!([{
                "ocupacion_id": ocupacion_id,
                "playa_id": Uuid::new_v4(),
                "plaza_id": Uuid::new_v4(),
                "patente": "AB123CD",
                "tipo_vehiculo": "AUTOMOVIL",
                "modalidad_ocupacion": "POR_HORA",
                "estado": "FINALIZADO",
                "hora_ingreso": texto_utc(ahora - Duration::hours(3)),
                "hora_egreso": texto_utc(ahora),
                "monto_pago": 4500.0,
                "metodo_pago": "EFECTIVO",
            }]),
        );
        let servicios = servicios(fake.clone(), None).await;
        sembrar_cache(&servicios.cache).await;

        let vista = servicios
            .ocupaciones
            .finalizar(
                &playero(),
                ocupacion_id,
                FinalizarOcupacionRequest {
                    metodo_pago: MetodoPago::Efectivo,
                    observaciones: Some("   ".into()),
                },
                ahora,
            )
            .await
            .unwrap();
        assert!(vista.puede_editar_metodo_pago);
        assert_eq!(vista.ocupacion.monto_pago, Some(4500.0));

        let llamada = llamada_rpc(&fake, "finalizar_ocupacion");
        assert_eq!(
            llamada.params,
            json!({
                "p_ocupacion_id": ocupacion_id,
                "p_metodo_pago": "EFECTIVO",
                "p_observaciones": null,
            })
        );
        assert_eq!(
            etiquetas_invalidadas(&servicios.cache).await,
            vec![CacheTag::Ocupaciones, CacheTag::Turnos, CacheTag::Recaudacion]
        );
    }

    #[actix_rt::test]
    async fn finalizar_abono_y_pagar_boleta() {
        let fake = FakeBackend::new();
        let abono_id = Uuid::new_v4();
        let boleta_id = Uuid::new_v4();
        fake.con_rpc("finalizar_abono", json!(null));
        fake.con_rpc(
            "registrar_pago_boleta",
            json!({
                "boleta_id": boleta_id,
                "abono_id": abono_id,
                "fecha_generacion_boleta": "2024-06-01",
                "fecha_vencimiento_boleta": "2024-06-10",
                "monto": 15000.5,
                "monto_pagado": 15000.5,
                "estado": "PAGADA",
            }),
        );
        let servicios = servicios(fake.clone(), None).await;

        sembrar_cache(&servicios.cache).await;
        servicios.abonos.finalizar(&dueno(), abono_id).await.unwrap();
        assert_eq!(
            llamada_rpc(&fake, "finalizar_abono").params,
            json!({ "p_abono_id": abono_id })
        );
        assert_eq!(
            etiquetas_invalidadas(&servicios.cache).await,
            vec![CacheTag::Plazas, CacheTag::Abonos]
        );

        let err = servicios
            .abonos
            .registrar_pago_boleta(
                &dueno(),
                boleta_id,
                RegistrarPagoBoletaRequest {
                    monto: 0.0,
                    metodo_pago: MetodoPago::Efectivo,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validacion { ref campo, .. } if campo == "monto"));
        assert_eq!(fake.cantidad("rpc", "registrar_pago_boleta"), 0);

        sembrar_cache(&servicios.cache).await;
        let boleta = servicios
            .abonos
            .registrar_pago_boleta(
                &dueno(),
                boleta_id,
                RegistrarPagoBoletaRequest {
                    monto: 15000.5,
                    metodo_pago: MetodoPago::MercadoPago,
                },
            )
            .await
            .unwrap();
        assert_eq!(boleta.estado, EstadoBoleta::Pagada);
        assert_eq!(
            llamada_rpc(&fake, "registrar_pago_boleta").params,
            json!({
                "p_boleta_id": boleta_id,
                "p_monto": 15000.5,
                "p_metodo_pago": "MERCADO_PAGO",
            })
        );
        assert_eq!(
            etiquetas_invalidadas(&servicios.cache).await,
            vec![CacheTag::Abonos, CacheTag::Turnos, CacheTag::Recaudacion]
        );
    }

    #[actix_rt::test]
    async fn ciclo_de_invitaciones_y_asignaciones() {
        let fake = FakeBackend::new();
        fake.con_rpc("eliminar_invitacion_playero", json!(null));
        fake.con_rpc("aceptar_invitacion_playero", json!(null));
        fake.con_rpc("asignar_playas_playero", json!(null));
        let servicios = servicios(fake.clone(), None).await;

        sembrar_cache(&servicios.cache).await;
        servicios
            .playeros
            .eliminar_invitacion(&dueno(), " Nuevo@Playas.com ")
            .await
            .unwrap();
        assert_eq!(
            llamada_rpc(&fake, "eliminar_invitacion_playero").params,
            json!({ "p_email": "nuevo@playas.com" })
        );
        assert_eq!(
            etiquetas_invalidadas(&servicios.cache).await,
            vec![CacheTag::Playeros]
        );

        // la acepta el invitado, que todavía no es dueño
        sembrar_cache(&servicios.cache).await;
        servicios
            .playeros
            .aceptar_invitacion(
                &playero(),
                AceptarInvitacionRequest {
                    token: " tok-123 ".into(),
                },
            )
            .await
            .unwrap();
        let llamada = llamada_rpc(&fake, "aceptar_invitacion_playero");
        assert_eq!(llamada.params, json!({ "p_token": "tok-123" }));
        assert_eq!(llamada.token.as_deref(), Some(TOKEN_PLAYERO));
        assert_eq!(
            etiquetas_invalidadas(&servicios.cache).await,
            vec![CacheTag::Playas, CacheTag::Playeros]
        );

        let playas = vec![Uuid::new_v4(), Uuid::new_v4()];
        sembrar_cache(&servicios.cache).await;
        servicios
            .playeros
            .asignar_playas(
                &dueno(),
                playero_id(),
                AsignarPlayasRequest {
                    playas_ids: playas.clone(),
                },
            )
            .await
            .unwrap();
        assert_eq!(
            llamada_rpc(&fake, "asignar_playas_playero").params,
            json!({ "p_playero_id": playero_id(), "p_playas_ids": &playas })
        );
        assert_eq!(
            etiquetas_invalidadas(&servicios.cache).await,
            vec![CacheTag::Playeros]
        );

        let err = servicios
            .playeros
            .asignar_playas(&playero(), playero_id(), AsignarPlayasRequest { playas_ids: playas })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Prohibido(_)));
    }

    #[actix_rt::test]
    async fn baja_de_playa_es_logica() {
        let fake = FakeBackend::new();
        let playa_id = Uuid::new_v4();
        fake.con_filas(
            "playa",
            vec![json!({
                "playa_id": playa_id,
                "playa_dueno_id": dueno_id(),
                "direccion": "San Martín 100",
                "ciudad_id": 1,
                "estado": "ACTIVO",
            })],
        );
        let servicios = servicios(fake.clone(), None).await;

        sembrar_cache(&servicios.cache).await;
        servicios.playas.eliminar(&dueno(), playa_id).await.unwrap();

        let filas = fake.filas("playa");
        assert_eq!(filas.len(), 1);
        assert!(filas[0]["fecha_eliminacion"].is_string());
        assert_eq!(fake.cantidad("delete", "playa"), 0);
        assert_eq!(
            etiquetas_invalidadas(&servicios.cache).await,
            vec![CacheTag::Playas, CacheTag::Plazas, CacheTag::Tarifas]
        );

        // ya dada de baja: no se vuelve a encontrar
        let err = servicios.playas.eliminar(&dueno(), playa_id).await.unwrap_err();
        assert!(matches!(err, AppError::NoEncontrado(_)));
    }
}
