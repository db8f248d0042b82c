use crate::features::navigation::dtos::{NavigationDto, NavigationItemDto};

struct Entry {
    title: &'static str,
    href: Option<&'static str>,
    badge: bool,
    children: &'static [(&'static str, &'static str)],
}

const MENU: &[Entry] = &[
    Entry {
        title: "Visão Geral",
        href: Some("/"),
        badge: false,
        children: &[],
    },
    Entry {
        title: "Gerenciar Catálogo",
        href: Some("/servicos"),
        badge: false,
        children: &[],
    },
    Entry {
        title: "Verificações",
        href: Some("/verificacao"),
        badge: true,
        children: &[],
    },
    Entry {
        title: "Usuários",
        href: None,
        badge: false,
        children: &[
            ("Prestadores", "/usuarios/prestadores"),
            ("Clientes", "/usuarios/clientes"),
        ],
    },
    Entry {
        title: "Mapa",
        href: Some("/mapa"),
        badge: false,
        children: &[],
    },
];

/// Sidebar tree with the entry for `current_path` marked active
///
/// A group is active when one of its children is.
pub fn navigation(current_path: Option<&str>) -> NavigationDto {
    let current = normalize(current_path.unwrap_or("/"));

    let items = MENU
        .iter()
        .map(|entry| {
            let children: Vec<NavigationItemDto> = entry
                .children
                .iter()
                .map(|(title, href)| NavigationItemDto {
                    title: title.to_string(),
                    href: Some(href.to_string()),
                    active: *href == current,
                    badge: false,
                    children: Vec::new(),
                })
                .collect();

            let active = match entry.href {
                Some(href) => href == current,
                None => children.iter().any(|c| c.active),
            };

            NavigationItemDto {
                title: entry.title.to_string(),
                href: entry.href.map(str::to_string),
                active,
                badge: entry.badge,
                children,
            }
        })
        .collect();

    NavigationDto {
        current_path: current,
        items,
    }
}

/// Strip query, fragment and trailing slashes; blank becomes `/`
fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default().trim();
    let trimmed = path.trim_end_matches('/');

    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
