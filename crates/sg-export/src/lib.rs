/// Écriture des pages rendues sur disque, un fichier par panneau.

pub mod format;
pub mod writer;

pub use writer::SignWriter;
