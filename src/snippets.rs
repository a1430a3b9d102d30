use dashmap::DashMap;
use std::fmt;
use std::sync::LazyLock;

const EXAMPLE_HOST: &str = "https://example.com";

static GLOBAL_SNIPPET_CACHE: LazyLock<DashMap<(SnippetLang, SnippetKind), String>> =
    LazyLock::new(DashMap::new);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnippetLang {
    Js,
    Python,
    Curl,
}

impl SnippetLang {
    pub const ALL: [SnippetLang; 3] = [SnippetLang::Js, SnippetLang::Python, SnippetLang::Curl];

    pub fn id(&self) -> &'static str {
        match self {
            SnippetLang::Js => "js",
            SnippetLang::Python => "py",
            SnippetLang::Curl => "curl",
        }
    }
}

impl fmt::Display for SnippetLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SnippetLang::Js => "JS",
            SnippetLang::Python => "Python",
            SnippetLang::Curl => "cURL",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnippetKind {
    Projects,
    Issue,
    Upload,
}

impl SnippetKind {
    pub const ALL: [SnippetKind; 3] = [SnippetKind::Projects, SnippetKind::Issue, SnippetKind::Upload];

    pub fn id(&self) -> &'static str {
        match self {
            SnippetKind::Projects => "projects",
            SnippetKind::Issue => "issue",
            SnippetKind::Upload => "upload",
        }
    }
}

/// DOM id of a card's code panel. Each card has one panel shared by its tabs.
pub fn panel_id(kind: SnippetKind) -> String {
    format!("{}-code-panel", kind.id())
}

pub fn tab_id(kind: SnippetKind, lang: SnippetLang) -> String {
    format!("{}-{}-tab", kind.id(), lang.id())
}

pub fn endpoint(kind: SnippetKind) -> &'static str {
    match kind {
        SnippetKind::Projects => "/api/projects?limit=5",
        SnippetKind::Issue => "/api/issues",
        SnippetKind::Upload => "/api/assets",
    }
}

pub fn build_snippet(lang: SnippetLang, kind: SnippetKind) -> String {
    let endpoint = endpoint(kind);
    match (lang, kind) {
        (SnippetLang::Js, SnippetKind::Upload) => format!(
            "// JS (fetch)\n\
             const fd = new FormData();\n\
             fd.append('file', fileInput.files[0]);\n\
             const res = await fetch('{endpoint}', {{ method: 'POST', body: fd }});\n\
             console.log(await res.json());"
        ),
        (SnippetLang::Js, SnippetKind::Issue) => format!(
            "// JS (fetch)\n\
             const res = await fetch('{endpoint}', {{\n  \
             method: 'POST',\n  \
             headers: {{ 'Content-Type': 'application/json' }},\n  \
             body: JSON.stringify({{ title: 'Bug: terminal flicker', priority: 'high' }})\n\
             }});\n\
             console.log(await res.json());"
        ),
        (SnippetLang::Js, SnippetKind::Projects) => format!(
            "// JS (fetch)\n\
             const res = await fetch('{endpoint}');\n\
             console.log(await res.json());"
        ),
        (SnippetLang::Python, SnippetKind::Upload) => format!(
            "# Python (requests)\n\
             import requests\n\
             files = {{ 'file': open('logo.svg','rb') }}\n\
             r = requests.post('{EXAMPLE_HOST}{endpoint}', files=files)\n\
             print(r.json())"
        ),
        (SnippetLang::Python, SnippetKind::Issue) => format!(
            "# Python (requests)\n\
             import requests\n\
             r = requests.post('{EXAMPLE_HOST}{endpoint}', json={{\n  \
             'title': 'Bug: terminal flicker',\n  \
             'priority': 'high'\n\
             }})\n\
             print(r.json())"
        ),
        (SnippetLang::Python, SnippetKind::Projects) => format!(
            "# Python (requests)\n\
             import requests\n\
             r = requests.get('{EXAMPLE_HOST}{endpoint}')\n\
             print(r.json())"
        ),
        (SnippetLang::Curl, SnippetKind::Upload) => format!(
            "curl -X POST {EXAMPLE_HOST}{endpoint} \\\n  \
             -F \"file=@logo.svg\""
        ),
        (SnippetLang::Curl, SnippetKind::Issue) => format!(
            "curl -X POST {EXAMPLE_HOST}{endpoint} \\\n  \
             -H 'Content-Type: application/json' \\\n  \
             -d '{{\"title\":\"Bug: terminal flicker\",\"priority\":\"high\"}}'"
        ),
        (SnippetLang::Curl, SnippetKind::Projects) => format!("curl {EXAMPLE_HOST}{endpoint}"),
    }
}

/// Cached [`build_snippet`].
pub fn snippet(lang: SnippetLang, kind: SnippetKind) -> String {
    GLOBAL_SNIPPET_CACHE
        .entry((lang, kind))
        .or_insert_with(|| build_snippet(lang, kind))
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_snippets() {
        assert_eq!(
            build_snippet(SnippetLang::Js, SnippetKind::Projects),
            "// JS (fetch)\nconst res = await fetch('/api/projects?limit=5');\nconsole.log(await res.json());"
        );
        assert_eq!(
            build_snippet(SnippetLang::Js, SnippetKind::Issue),
            [
                "// JS (fetch)",
                "const res = await fetch('/api/issues', {",
                "  method: 'POST',",
                "  headers: { 'Content-Type': 'application/json' },",
                "  body: JSON.stringify({ title: 'Bug: terminal flicker', priority: 'high' })",
                "});",
                "console.log(await res.json());",
            ]
            .join("\n")
        );
        let upload = build_snippet(SnippetLang::Js, SnippetKind::Upload);
        assert!(upload.contains("fetch('/api/assets', { method: 'POST', body: fd })"));
        assert_eq!(upload.lines().count(), 5);
    }

    #[test]
    fn test_python_snippets() {
        assert_eq!(
            build_snippet(SnippetLang::Python, SnippetKind::Projects),
            "# Python (requests)\nimport requests\nr = requests.get('https://example.com/api/projects?limit=5')\nprint(r.json())"
        );
        assert_eq!(
            build_snippet(SnippetLang::Python, SnippetKind::Issue),
            [
                "# Python (requests)",
                "import requests",
                "r = requests.post('https://example.com/api/issues', json={",
                "  'title': 'Bug: terminal flicker',",
                "  'priority': 'high'",
                "})",
                "print(r.json())",
            ]
            .join("\n")
        );
        assert!(build_snippet(SnippetLang::Python, SnippetKind::Upload)
            .contains("files = { 'file': open('logo.svg','rb') }"));
    }

    #[test]
    fn test_curl_snippets() {
        assert_eq!(
            build_snippet(SnippetLang::Curl, SnippetKind::Projects),
            "curl https://example.com/api/projects?limit=5"
        );
        assert_eq!(
            build_snippet(SnippetLang::Curl, SnippetKind::Upload),
            "curl -X POST https://example.com/api/assets \\\n  -F \"file=@logo.svg\""
        );
        assert_eq!(
            build_snippet(SnippetLang::Curl, SnippetKind::Issue),
            "curl -X POST https://example.com/api/issues \\\n  -H 'Content-Type: application/json' \\\n  -d '{\"title\":\"Bug: terminal flicker\",\"priority\":\"high\"}'"
        );
    }

    #[test]
    fn test_cache_matches_builder() {
        for lang in SnippetLang::ALL {
            for kind in SnippetKind::ALL {
                assert_eq!(snippet(lang, kind), build_snippet(lang, kind));
                assert_eq!(snippet(lang, kind), build_snippet(lang, kind));
            }
        }
        assert!(GLOBAL_SNIPPET_CACHE.len() >= 9);
    }

    #[test]
    fn test_tab_labels() {
        let labels: Vec<_> = SnippetLang::ALL.iter().map(|l| l.to_string()).collect();
        assert_eq!(labels, ["JS", "Python", "cURL"]);
        assert_eq!(SnippetLang::Python.id(), "py");
    }

    #[test]
    fn test_tab_and_panel_ids_unique_across_cards() {
        let mut ids = std::collections::HashSet::new();
        for kind in SnippetKind::ALL {
            assert!(ids.insert(panel_id(kind)));
            for lang in SnippetLang::ALL {
                assert!(ids.insert(tab_id(kind, lang)));
            }
        }
        assert_eq!(ids.len(), 12);
        assert_eq!(panel_id(SnippetKind::Issue), "issue-code-panel");
        assert_eq!(tab_id(SnippetKind::Upload, SnippetLang::Curl), "upload-curl-tab");
    }
}
