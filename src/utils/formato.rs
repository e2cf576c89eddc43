//! utils/formato.rs
//! Formato de montos (es-AR) y duraciones para las respuestas.

fn agrupar_miles(entero: u64) -> String {
    let digitos = entero.to_string();
    let mut salida = String::with_capacity(digitos.len() + digitos.len() / 3);
    for (i, c) in digitos.chars().enumerate() {
        if i > 0 && (digitos.len() - i) % 3 == 0 {
            salida.push('.');
        }
        salida.push(c);
    }
    salida
}

/// `1234.5` -> `"$ 1.234,50"`, `-20.0` -> `"-$ 20,00"`.
pub fn formatear_moneda(valor: f64) -> String {
    let centavos = (valor.abs() * 100.0).round() as u64;
    let signo = if valor < 0.0 && centavos > 0 { "-" } else { "" };
    format!(
        "{}$ {},{:02}",
        signo,
        agrupar_miles(centavos / 100),
        centavos % 100
    )
}

/// Duración de una estadía: `"45m"`, `"2h 05m"`, `"1d 3h"`.
pub fn formatear_duracion(minutos: i64) -> String {
    let minutos = minutos.max(0);
    let (dias, horas, mins) = (minutos / 1440, (minutos % 1440) / 60, minutos % 60);
    if dias > 0 {
        format!("{}d {}h", dias, horas)
    } else if horas > 0 {
        format!("{}h {:02}m", horas, mins)
    } else {
        format!("{}m", mins)
    }
}
