//! services/cache_service.rs
//! Cache en memoria de lecturas, invalidable por etiqueta.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheTag {
    Playas,
    Plazas,
    Tarifas,
    Abonos,
    Ocupaciones,
    Turnos,
    Playeros,
    Recaudacion,
    Catalogo,
}

/// Valores aceptados por `POST /api/revalidate?type=`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevalidateType {
    Playas,
    Plazas,
    Tarifas,
    Abonos,
    Ocupaciones,
    Turnos,
    Playeros,
    Recaudacion,
    Catalogo,
    Todo,
}

impl RevalidateType {
    /// `None` significa invalidar todo.
    pub fn tag(&self) -> Option<CacheTag> {
        match self {
            RevalidateType::Playas => Some(CacheTag::Playas),
            RevalidateType::Plazas => Some(CacheTag::Plazas),
            RevalidateType::Tarifas => Some(CacheTag::Tarifas),
            RevalidateType::Abonos => Some(CacheTag::Abonos),
            RevalidateType::Ocupaciones => Some(CacheTag::Ocupaciones),
            RevalidateType::Turnos => Some(CacheTag::Turnos),
            RevalidateType::Playeros => Some(CacheTag::Playeros),
            RevalidateType::Recaudacion => Some(CacheTag::Recaudacion),
            RevalidateType::Catalogo => Some(CacheTag::Catalogo),
            RevalidateType::Todo => None,
        }
    }
}

struct Entrada {
    valor: Value,
    tags: Vec<CacheTag>,
    expira: Instant,
}

/// Las lecturas en vuelo se descartan si alguna de sus etiquetas se invalidó
/// mientras cargaban: cada invalidación sube la generación de la etiqueta y
/// `invalidar_todo` sube la época.
#[derive(Clone)]
pub struct CacheService {
    entradas: Arc<DashMap<String, Entrada>>,
    generaciones: Arc<DashMap<CacheTag, u64>>,
    epoca: Arc<AtomicU64>,
    ttl: Duration,
}

impl CacheService {
    pub fn new(ttl: Duration) -> Self {
        CacheService {
            entradas: Arc::new(DashMap::new()),
            generaciones: Arc::new(DashMap::new()),
            epoca: Arc::new(AtomicU64::new(0)),
            ttl,
        }
    }

    fn vigente(&self, clave: &str) -> Option<Value> {
        let ahora = Instant::now();
        let valor = self
            .entradas
            .get(clave)
            .filter(|e| e.expira > ahora)
            .map(|e| e.valor.clone());
        if valor.is_none() {
            self.entradas.remove_if(clave, |_, e| e.expira <= ahora);
        }
        valor
    }

    fn marca(&self, tags: &[CacheTag]) -> (u64, Vec<u64>) {
        let epoca = self.epoca.load(Ordering::SeqCst);
        let generaciones = tags
            .iter()
            .map(|t| self.generaciones.get(t).map_or(0, |g| *g))
            .collect();
        (epoca, generaciones)
    }

    /// Devuelve lo cacheado bajo `clave` o ejecuta `cargar` y lo guarda con
    /// las etiquetas dadas. Los errores no se cachean.
    pub async fn obtener_o_cargar<T, F, Fut>(
        &self,
        clave: String,
        tags: &[CacheTag],
        cargar: F,
    ) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        if let Some(valor) = self.vigente(&clave) {
            if let Ok(t) = serde_json::from_value(valor) {
                return Ok(t);
            }
        }

        let antes = self.marca(tags);
        let cargado = cargar().await?;
        if self.marca(tags) != antes {
            log::debug!("Cache: {} invalidada durante la carga, no se guarda", clave);
            return Ok(cargado);
        }

        let valor = serde_json::to_value(&cargado)?;
        self.purgar_vencidas();
        self.entradas.insert(
            clave.clone(),
            Entrada {
                valor,
                tags: tags.to_vec(),
                expira: Instant::now() + self.ttl,
            },
        );
        // una invalidación entre el chequeo y el insert
        if self.marca(tags) != antes {
            self.entradas.remove(&clave);
        }
        Ok(cargado)
    }

    /// Saca las entradas vencidas aunque nadie las vuelva a leer.
    pub fn purgar_vencidas(&self) -> usize {
        let ahora = Instant::now();
        let mut borradas = 0;
        self.entradas.retain(|_, e| {
            let vencida = e.expira <= ahora;
            if vencida {
                borradas += 1;
            }
            !vencida
        });
        borradas
    }

    /// Borra las entradas con la etiqueta y devuelve cuántas eran.
    pub fn invalidar(&self, tag: CacheTag) -> usize {
        *self.generaciones.entry(tag).or_insert(0) += 1;
        let mut borradas = 0;
        self.entradas.retain(|_, e| {
            let sale = e.tags.contains(&tag);
            if sale {
                borradas += 1;
            }
            !sale
        });
        log::debug!("Cache: invalidada etiqueta {:?} ({} entradas)", tag, borradas);
        borradas
    }

    pub fn invalidar_varias(&self, tags: &[CacheTag]) {
        for tag in tags {
            self.invalidar(*tag);
        }
    }

    pub fn invalidar_todo(&self) -> usize {
        self.epoca.fetch_add(1, Ordering::SeqCst);
        let mut borradas = 0;
        self.entradas.retain(|_, _| {
            borradas += 1;
            false
        });
        borradas
    }

    pub fn len(&self) -> usize {
        self.entradas.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use std::sync::atomic::AtomicUsize;

    #[actix_rt::test]
    async fn segunda_lectura_sale_de_cache() {
        let cache = CacheService::new(Duration::from_secs(60));
        let contador = AtomicUsize::new(0);
        let llamadas = &contador;

        for _ in 0..3 {
            let v: Vec<i32> = cache
                .obtener_o_cargar("k".into(), &[CacheTag::Playas], || async move {
                    llamadas.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![1, 2])
                })
                .await
                .unwrap();
            assert_eq!(v, vec![1, 2]);
        }
        assert_eq!(contador.load(Ordering::SeqCst), 1);
    }

    #[actix_rt::test]
    async fn invalidar_borra_solo_la_etiqueta() {
        let cache = CacheService::new(Duration::from_secs(60));
        let _: i32 = cache
            .obtener_o_cargar("a".into(), &[CacheTag::Playas], || async { Ok(1) })
            .await
            .unwrap();
        let _: i32 = cache
            .obtener_o_cargar("b".into(), &[CacheTag::Tarifas, CacheTag::Recaudacion], || async {
                Ok(2)
            })
            .await
            .unwrap();

        assert_eq!(cache.invalidar(CacheTag::Recaudacion), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.invalidar_todo(), 1);
        assert_eq!(cache.len(), 0);
    }

    #[actix_rt::test]
    async fn errores_no_se_cachean_y_ttl_vence() {
        let cache = CacheService::new(Duration::from_millis(0));
        let r: AppResult<i32> = cache
            .obtener_o_cargar("x".into(), &[CacheTag::Playas], || async {
                Err(AppError::NoEncontrado("no".into()))
            })
            .await;
        assert!(r.is_err());
        assert_eq!(cache.len(), 0);

        let _: i32 = cache
            .obtener_o_cargar("x".into(), &[CacheTag::Playas], || async { Ok(1) })
            .await
            .unwrap();
        // ttl 0: la próxima lectura vuelve a cargar
        let v: i32 = cache
            .obtener_o_cargar("x".into(), &[CacheTag::Playas], || async { Ok(2) })
            .await
            .unwrap();
        assert_eq!(v, 2);
    }

    #[actix_rt::test]
    async fn carga_invalidada_en_vuelo_no_queda_cacheada() {
        let cache = CacheService::new(Duration::from_secs(60));
        let cache_en_carga = cache.clone();

        let primera: i32 = cache
            .obtener_o_cargar("playas:dueno".into(), &[CacheTag::Playas], move || async move {
                // una mutación termina mientras la lectura sigue en curso
                cache_en_carga.invalidar(CacheTag::Playas);
                Ok(1)
            })
            .await
            .unwrap();
        assert_eq!(primera, 1);
        assert_eq!(cache.len(), 0);

        let segunda: i32 = cache
            .obtener_o_cargar("playas:dueno".into(), &[CacheTag::Playas], || async { Ok(2) })
            .await
            .unwrap();
        assert_eq!(segunda, 2);
    }

    #[actix_rt::test]
    async fn invalidar_todo_en_vuelo_tambien_descarta() {
        let cache = CacheService::new(Duration::from_secs(60));
        let cache_en_carga = cache.clone();
        let _: i32 = cache
            .obtener_o_cargar("k".into(), &[CacheTag::Turnos], move || async move {
                cache_en_carga.invalidar_todo();
                Ok(1)
            })
            .await
            .unwrap();
        assert_eq!(cache.len(), 0);

        // otra etiqueta no afecta la carga
        let cache_en_carga = cache.clone();
        let _: i32 = cache
            .obtener_o_cargar("k".into(), &[CacheTag::Turnos], move || async move {
                cache_en_carga.invalidar(CacheTag::Playas);
                Ok(1)
            })
            .await
            .unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[actix_rt::test]
    async fn vencidas_sin_releer_se_purgan_al_insertar() {
        let cache = CacheService::new(Duration::from_millis(0));
        for dia in 1..=5 {
            let _: i32 = cache
                .obtener_o_cargar(format!("recaudacion:2024-05-0{}", dia), &[CacheTag::Recaudacion], || async {
                    Ok(1)
                })
                .await
                .unwrap();
        }
        // cada alta purga las anteriores ya vencidas
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.purgar_vencidas(), 1);
        assert_eq!(cache.len(), 0);
    }

    #[actix_rt::test]
    async fn invalidar_cuenta_lo_que_borra() {
        let cache = CacheService::new(Duration::from_secs(60));
        for clave in ["a", "b", "c"] {
            let _: i32 = cache
                .obtener_o_cargar(clave.into(), &[CacheTag::Abonos], || async { Ok(1) })
                .await
                .unwrap();
        }
        let _: i32 = cache
            .obtener_o_cargar("d".into(), &[CacheTag::Plazas], || async { Ok(1) })
            .await
            .unwrap();
        assert_eq!(cache.invalidar(CacheTag::Abonos), 3);
        assert_eq!(cache.invalidar(CacheTag::Abonos), 0);
        assert_eq!(cache.invalidar_todo(), 1);
    }
}
