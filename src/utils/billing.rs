//! utils/billing.rs
//! Prorrateo del primer mes de un abono.

use chrono::{Datelike, NaiveDate};

/// Cantidad de días del mes de `fecha` (contempla años bisiestos).
pub fn dias_del_mes(fecha: NaiveDate) -> u32 {
    let (anio, mes) = (fecha.year(), fecha.month());
    let primero_siguiente = if mes == 12 {
        NaiveDate::from_ymd_opt(anio + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(anio, mes + 1, 1)
    };
    // `fecha` es válida, así que el primero del mes siguiente también lo es
    primero_siguiente
        .and_then(|d| d.pred_opt())
        .map(|ultimo| ultimo.day())
        .unwrap_or(31)
}

/// Redondeo a 2 decimales (mitades hacia afuera del cero).
pub fn redondear_2(valor: f64) -> f64 {
    (valor * 100.0).round() / 100.0
}

/// Monto del primer cobro de un abono que arranca en `fecha_inicio`:
/// `tarifa_mensual / dias_del_mes * dias_restantes`, contando el día de inicio.
pub fn calcular_monto_prorrateado(tarifa_mensual: f64, fecha_inicio: NaiveDate) -> f64 {
    let dias_mes = dias_del_mes(fecha_inicio);
    let dias_restantes = dias_mes - fecha_inicio.day() + 1;
    redondear_2(tarifa_mensual / f64::from(dias_mes) * f64::from(dias_restantes))
}
