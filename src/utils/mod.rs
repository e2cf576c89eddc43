//! utils/mod.rs
//! Cálculos y helpers locales: prorrateo de abonos, ventana de edición de
//! pagos, formato y validación de datos de entrada.

pub mod billing;
pub mod fechas;
pub mod formato;
pub mod ocupacion;
pub mod validacion;
