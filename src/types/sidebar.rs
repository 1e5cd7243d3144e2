use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PAGE_PATTERNS: Vec<(Regex, &'static str)> = [
        (r"/panel/?$", "panel_empleados"),
        (r"/usuarios/?", "gestion_usuarios"),
        (r"/cotizaciones/dashboard/?$", "dashboard"),
        (r"/cotizaciones/clientes/?", "gestionar_clientes"),
        (r"/cotizaciones/servicios/?", "gestionar_servicios"),
        (r"/cotizaciones/materiales/?", "gestionar_materiales"),
        (
            r"/cotizaciones/categorias-empleados/?",
            "gestionar_categorias_empleados"
        ),
        (r"/cotizaciones/reportes/?", "reportes_dashboard"),
        (r"/cotizaciones/seguimiento-trabajos/?", "seguimiento_trabajos"),
    ]
    .into_iter()
    .map(|(pattern, page)| (Regex::new(pattern).expect("sidebar pattern is invalid"), page))
    .collect();
}

/// Sidebar entry to highlight for `path`: the first matching pattern whose
/// page is present in the sidebar.
pub fn active_page<S: AsRef<str>>(path: &str, pages: &[S]) -> Option<&'static str> {
    PAGE_PATTERNS
        .iter()
        .filter(|(pattern, _)| pattern.is_match(path))
        .map(|(_, page)| *page)
        .find(|page| pages.iter().any(|candidate| candidate.as_ref() == *page))
}
