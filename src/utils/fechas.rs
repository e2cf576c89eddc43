//! utils/fechas.rs
//! Los filtros por fecha y los reportes trabajan en hora de Argentina (UTC-3,
//! sin horario de verano); la base guarda todo en UTC.

use chrono::{
    DateTime, Duration, FixedOffset, LocalResult, NaiveDate, NaiveTime, Offset, SecondsFormat,
    TimeZone, Utc,
};

/// UTC-3
pub fn zona_argentina() -> FixedOffset {
    FixedOffset::west_opt(3 * 3600).unwrap_or_else(|| Utc.fix())
}

/// 00:00 hora local del día, en UTC.
pub fn inicio_dia_utc(fecha: NaiveDate) -> DateTime<Utc> {
    let medianoche = fecha.and_time(NaiveTime::MIN);
    match zona_argentina().from_local_datetime(&medianoche) {
        LocalResult::Single(local) => local.with_timezone(&Utc),
        // con offset fijo no hay horas ambiguas ni salteadas
        _ => Utc.from_utc_datetime(&medianoche),
    }
}

/// 00:00 hora local del día siguiente, en UTC (límite exclusivo).
pub fn fin_dia_utc(fecha: NaiveDate) -> DateTime<Utc> {
    inicio_dia_utc(fecha) + Duration::days(1)
}

/// Día calendario local de un instante.
pub fn fecha_local(instante: DateTime<Utc>) -> NaiveDate {
    instante.with_timezone(&zona_argentina()).date_naive()
}

pub fn hoy_local() -> NaiveDate {
    fecha_local(Utc::now())
}

/// Formato con el que se mandan los instantes en filtros y cuerpos.
pub fn texto_utc(instante: DateTime<Utc>) -> String {
    instante.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limites_del_dia_local() {
        let dia = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        assert_eq!(
            inicio_dia_utc(dia),
            Utc.with_ymd_and_hms(2024, 5, 10, 3, 0, 0).unwrap()
        );
        assert_eq!(
            fin_dia_utc(dia),
            Utc.with_ymd_and_hms(2024, 5, 11, 3, 0, 0).unwrap()
        );
    }

    #[test]
    fn madrugada_utc_es_el_dia_anterior_local() {
        let instante = Utc.with_ymd_and_hms(2024, 5, 10, 1, 30, 0).unwrap();
        assert_eq!(fecha_local(instante), NaiveDate::from_ymd_opt(2024, 5, 9).unwrap());
    }

    #[test]
    fn cada_dia_local_cubre_su_rango() {
        let dia = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(fecha_local(inicio_dia_utc(dia)), dia);
        assert_eq!(fecha_local(fin_dia_utc(dia) - Duration::seconds(1)), dia);
        assert_eq!(
            fecha_local(fin_dia_utc(dia)),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
        assert_eq!(zona_argentina().local_minus_utc(), -3 * 3600);
    }
}
