// ── Output renderers for table views ──

pub mod html;
