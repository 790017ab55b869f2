use leptos::prelude::*;

/// Контуры иконок (lucide, viewBox 24x24)
fn paths(name: &str) -> &'static [&'static str] {
    match name {
        "shipments" => &[
            "M3 7h13v10H3z",
            "M16 7h3l2 3v7h-5z",
            "M6 18a1.5 1.5 0 1 0 3 0a1.5 1.5 0 1 0-3 0",
            "M15 18a1.5 1.5 0 1 0 3 0a1.5 1.5 0 1 0-3 0",
        ],
        "file-text" => &[
            "M14 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V8z",
            "M14 2v6h6",
            "M8 13h8",
            "M8 17h5",
        ],
        "check-square" => &[
            "M9 11l3 3L22 4",
            "M21 12v7a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h11",
        ],
        "arrow-up-right" => &["M7 17L17 7", "M7 7h10v10"],
        "arrow-down-left" => &["M17 7L7 17", "M17 17H7V7"],
        "warehouse" => &["M3 21V8l9-5 9 5v13", "M7 21v-8h10v8", "M7 17h10"],
        "refresh" => &[
            "M21 12a9 9 0 0 0-9-9 9.75 9.75 0 0 0-6.74 2.74L3 8",
            "M3 3v5h5",
            "M3 12a9 9 0 0 0 9 9 9.75 9.75 0 0 0 6.74-2.74L21 16",
            "M16 16h5v5",
        ],
        "filter" => &["M22 3H2l8 9.46V19l4 2v-8.54z"],
        "eye" => &[
            "M2 12s3-7 10-7 10 7 10 7-3 7-10 7-10-7-10-7z",
            "M9 12a3 3 0 1 0 6 0a3 3 0 1 0-6 0",
        ],
        "send" => &["M22 2L11 13", "M22 2l-7 20-4-9-9-4z"],
        "check" => &["M20 6L9 17l-5-5"],
        "x" => &["M18 6L6 18", "M6 6l12 12"],
        "check-circle" => &["M22 11.08V12a10 10 0 1 1-5.93-9.14", "M22 4L12 14.01l-3-3"],
        "x-circle" => &["M2 12a10 10 0 1 0 20 0a10 10 0 1 0-20 0", "M15 9l-6 6", "M9 9l6 6"],
        "clock" => &["M2 12a10 10 0 1 0 20 0a10 10 0 1 0-20 0", "M12 6v6l4 2"],
        "calendar" => &["M5 4h14a2 2 0 0 1 2 2v14a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V6a2 2 0 0 1 2-2z", "M16 2v4", "M8 2v4", "M3 10h18"],
        "loader" => &["M12 2v4", "M12 18v4", "M4.93 4.93l2.83 2.83", "M16.24 16.24l2.83 2.83", "M2 12h4", "M18 12h4"],
        "info" => &["M2 12a10 10 0 1 0 20 0a10 10 0 1 0-20 0", "M12 16v-4", "M12 8h.01"],
        "alert-triangle" => &[
            "M10.29 3.86L1.82 18a2 2 0 0 0 1.71 3h16.94a2 2 0 0 0 1.71-3L13.71 3.86a2 2 0 0 0-3.42 0z",
            "M12 9v4",
            "M12 17h.01",
        ],
        "user" => &[
            "M20 21v-2a4 4 0 0 0-4-4H8a4 4 0 0 0-4 4v2",
            "M8 7a4 4 0 1 0 8 0a4 4 0 1 0-8 0",
        ],
        "log-out" => &[
            "M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4",
            "M16 17l5-5-5-5",
            "M21 12H9",
        ],
        "panel-left" => &["M3 5a2 2 0 0 1 2-2h14a2 2 0 0 1 2 2v14a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2z", "M9 3v18"],
        "chevron-right" => &["M9 18l6-6-6-6"],
        "chevron-left" => &["M15 18l-6-6 6-6"],
        "chevrons-right" => &["M13 17l5-5-5-5", "M6 17l5-5-5-5"],
        "chevrons-left" => &["M11 17l-5-5 5-5", "M18 17l-5-5 5-5"],
        _ => &["M2 12a10 10 0 1 0 20 0a10 10 0 1 0-20 0", "M12 8v4l3 3"],
    }
}

pub fn icon(name: &str) -> AnyView {
    let paths = paths(name);
    view! {
        <svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true">
            {paths.iter().map(|d| view! { <path d=*d /> }).collect_view()}
        </svg>
    }
    .into_any()
}
