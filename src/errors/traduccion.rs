//! errors/traduccion.rs
//! Tabla estática para traducir los mensajes de error de la base de datos
//! (PostgREST, Postgres y el servicio de auth) a mensajes para el usuario.

/// Claves que tienen que coincidir con el mensaje completo.
const TRADUCCIONES_EXACTAS: &[(&str, &str)] = &[
    (
        "duplicate key value violates unique constraint \"plaza_playa_id_identificador_key\"",
        "Ya existe una plaza con ese identificador en esta playa",
    ),
    (
        "duplicate key value violates unique constraint \"tarifa_pkey\"",
        "Ya existe una tarifa para esa combinación de plaza, modalidad y vehículo",
    ),
    (
        "duplicate key value violates unique constraint \"playero_invitacion_email_key\"",
        "Ya existe una invitación pendiente para ese email",
    ),
    ("Invalid login credentials", "Email o contraseña incorrectos"),
    ("Email not confirmed", "Todavía no confirmaste tu email"),
    ("User already registered", "Ya existe un usuario registrado con ese email"),
    ("JWT expired", "Tu sesión expiró, volvé a iniciar sesión"),
    (
        "Password should be at least 6 characters",
        "La contraseña debe tener al menos 6 caracteres",
    ),
];

/// Claves que alcanza con que aparezcan dentro del mensaje. Se evalúan en orden.
const TRADUCCIONES_PARCIALES: &[(&str, &str)] = &[
    (
        "duplicate key value violates unique constraint",
        "Ya existe un registro con esos datos",
    ),
    (
        "violates foreign key constraint",
        "La operación no es posible porque hay datos relacionados",
    ),
    (
        "violates row-level security policy",
        "No tenés permisos para realizar esta acción",
    ),
    ("violates check constraint", "Alguno de los valores no es válido"),
    ("null value in column", "Falta completar un campo obligatorio"),
    ("invalid input syntax", "El formato de alguno de los datos es incorrecto"),
    ("JWT", "Tu sesión no es válida, volvé a iniciar sesión"),
    ("permission denied", "No tenés permisos para realizar esta acción"),
    ("Could not find the function", "La operación solicitada no está disponible"),
    ("error sending request", "No se pudo conectar con la base de datos"),
];

/// Traduce un mensaje de error de la base de datos.
///
/// Las coincidencias exactas tienen prioridad sobre las parciales; si no hay
/// ninguna se devuelve el mensaje original.
pub fn traducir_error_db(mensaje: &str) -> String {
    let recortado = mensaje.trim();

    if let Some((_, traduccion)) = TRADUCCIONES_EXACTAS
        .iter()
        .find(|(clave, _)| *clave == recortado)
    {
        return (*traduccion).to_string();
    }

    TRADUCCIONES_PARCIALES
        .iter()
        .find(|(clave, _)| recortado.contains(clave))
        .map(|(_, traduccion)| (*traduccion).to_string())
        .unwrap_or_else(|| mensaje.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exacta_gana_sobre_parcial() {
        let msg = "duplicate key value violates unique constraint \"plaza_playa_id_identificador_key\"";
        assert_eq!(
            traducir_error_db(msg),
            "Ya existe una plaza con ese identificador en esta playa"
        );
    }

    #[test]
    fn parcial_cuando_no_hay_exacta() {
        let msg = "duplicate key value violates unique constraint \"abono_pkey\"";
        assert_eq!(traducir_error_db(msg), "Ya existe un registro con esos datos");
    }

    #[test]
    fn mensaje_desconocido_pasa_sin_cambios() {
        let msg = "La plaza ya se encuentra ocupada";
        assert_eq!(traducir_error_db(msg), msg);
    }

    #[test]
    fn jwt_expired_usa_la_exacta() {
        assert_eq!(
            traducir_error_db("JWT expired"),
            "Tu sesión expiró, volvé a iniciar sesión"
        );
        assert_eq!(
            traducir_error_db("JWT malformed"),
            "Tu sesión no es válida, volvé a iniciar sesión"
        );
    }
}
