//! utils/validacion.rs
//! Validaciones de los datos que llegan en los formularios.

use chrono::NaiveDate;

use crate::errors::{AppError, AppResult};

/// Formatos de patente aceptados (L = letra, D = dígito):
/// autos viejos, Mercosur autos, Mercosur motos y motos viejas.
const FORMATOS_PATENTE: &[&str] = &["LLLDDD", "LLDDDLL", "LDDDLLL", "DDDLLL"];

pub fn normalizar_patente(patente: &str) -> String {
    patente
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '.')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Normaliza y valida una patente, devolviéndola lista para guardar.
pub fn validar_patente(patente: &str) -> AppResult<String> {
    let normalizada = normalizar_patente(patente);
    let forma: String = normalizada
        .chars()
        .map(|c| match c {
            'A'..='Z' => 'L',
            '0'..='9' => 'D',
            _ => '?',
        })
        .collect();

    if FORMATOS_PATENTE.contains(&forma.as_str()) {
        Ok(normalizada)
    } else {
        Err(AppError::validacion(
            "patente",
            format!("La patente '{}' no tiene un formato válido", patente.trim()),
        ))
    }
}

pub fn validar_email(email: &str) -> AppResult<String> {
    let email = email.trim().to_lowercase();
    let valido = match email.split_once('@') {
        Some((local, dominio)) => {
            !local.is_empty()
                && !dominio.contains('@')
                && dominio.contains('.')
                && !dominio.starts_with('.')
                && !dominio.ends_with('.')
                && !email.contains(char::is_whitespace)
                && email.len() <= 254
        }
        None => false,
    };

    if valido {
        Ok(email)
    } else {
        Err(AppError::validacion("email", "El email no es válido"))
    }
}

fn tiene_hasta_dos_decimales(valor: f64) -> bool {
    let centavos = valor * 100.0;
    (centavos - centavos.round()).abs() < 1e-6
}

/// Monto estrictamente positivo y con a lo sumo 2 decimales.
pub fn validar_monto(campo: &str, valor: f64) -> AppResult<f64> {
    if !valor.is_finite() || valor <= 0.0 {
        return Err(AppError::validacion(campo, "El monto debe ser mayor a 0"));
    }
    if !tiene_hasta_dos_decimales(valor) {
        return Err(AppError::validacion(
            campo,
            "El monto no puede tener más de 2 decimales",
        ));
    }
    Ok(valor)
}

/// Igual que `validar_monto` pero admite 0 (efectivo de caja).
pub fn validar_monto_no_negativo(campo: &str, valor: f64) -> AppResult<f64> {
    if valor == 0.0 {
        return Ok(valor);
    }
    if valor < 0.0 {
        return Err(AppError::validacion(campo, "El monto no puede ser negativo"));
    }
    validar_monto(campo, valor)
}

pub fn texto_requerido(campo: &str, valor: &str, max: usize) -> AppResult<String> {
    let recortado = valor.trim();
    if recortado.is_empty() {
        return Err(AppError::validacion(
            campo,
            format!("El campo {} es obligatorio", campo),
        ));
    }
    if recortado.chars().count() > max {
        return Err(AppError::validacion(
            campo,
            format!("El campo {} admite hasta {} caracteres", campo, max),
        ));
    }
    Ok(recortado.to_string())
}

/// Texto opcional: vacío o sólo espacios se toma como ausente.
pub fn texto_opcional(campo: &str, valor: Option<&str>, max: usize) -> AppResult<Option<String>> {
    match valor.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => texto_requerido(campo, v, max).map(Some),
    }
}

pub fn validar_rango_fechas(desde: Option<NaiveDate>, hasta: Option<NaiveDate>) -> AppResult<()> {
    match (desde, hasta) {
        (Some(d), Some(h)) if d > h => Err(AppError::validacion(
            "desde",
            "La fecha desde no puede ser posterior a la fecha hasta",
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("abc 123", "ABC123")]
    #[case("ab-123-cd", "AB123CD")]
    #[case("a123bcd", "A123BCD")]
    #[case("123 abc", "123ABC")]
    fn patentes_validas(#[case] entrada: &str, #[case] esperado: &str) {
        assert_eq!(validar_patente(entrada).unwrap(), esperado);
    }

    #[rstest]
    #[case("")]
    #[case("AB12")]
    #[case("ABCD123")]
    #[case("ÑBC123")]
    fn patentes_invalidas(#[case] entrada: &str) {
        let err = validar_patente(entrada).unwrap_err();
        assert!(matches!(err, AppError::Validacion { ref campo, .. } if campo == "patente"));
    }

    #[test]
    fn email() {
        assert_eq!(validar_email(" Juan@Playa.com ").unwrap(), "juan@playa.com");
        assert!(validar_email("juan@playa").is_err());
        assert!(validar_email("@playa.com").is_err());
        assert!(validar_email("juan perez@playa.com").is_err());
    }

    #[rstest]
    #[case(10.0, true)]
    #[case(10.25, true)]
    #[case(10.255, false)]
    #[case(0.0, false)]
    #[case(-1.0, false)]
    #[case(f64::NAN, false)]
    fn montos(#[case] valor: f64, #[case] ok: bool) {
        assert_eq!(validar_monto("monto", valor).is_ok(), ok);
    }

    #[test]
    fn monto_no_negativo_admite_cero() {
        assert!(validar_monto_no_negativo("efectivo", 0.0).is_ok());
        assert!(validar_monto_no_negativo("efectivo", -5.0).is_err());
    }

    #[test]
    fn textos() {
        assert_eq!(texto_requerido("nombre", "  Centro ", 10).unwrap(), "Centro");
        assert!(texto_requerido("nombre", "   ", 10).is_err());
        assert!(texto_requerido("nombre", "abcdefghijk", 10).is_err());
        assert_eq!(texto_opcional("horario", Some("  "), 10).unwrap(), None);
    }

    #[test]
    fn rango_fechas() {
        let d = NaiveDate::from_ymd_opt(2024, 5, 2);
        let h = NaiveDate::from_ymd_opt(2024, 5, 1);
        assert!(validar_rango_fechas(d, h).is_err());
        assert!(validar_rango_fechas(h, d).is_ok());
        assert!(validar_rango_fechas(None, h).is_ok());
    }
}
