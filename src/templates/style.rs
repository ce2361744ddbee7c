/// Inline stylesheet shared by every page
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
:root{--bg:#fdfdfc;--fg:#1a1a1a;--fg2:#555;--fg3:#8a8a8a;--accent:#2b6cb0;--border:#e6e6e6;--mono:ui-monospace,SFMono-Regular,Menlo,monospace}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.7;color:var(--fg);background:var(--bg);display:flex;flex-direction:column;align-items:center;padding:2rem 1rem;min-height:100vh}
header.site,main,footer.site{max-width:720px;width:100%}
header.site{margin-bottom:2.5rem}
header.site a{color:var(--fg);font-weight:700;font-size:1.25rem;text-decoration:none}
footer.site{margin-top:4rem;color:var(--fg3);font-size:.85rem}
a{color:var(--accent)}
img{max-width:100%;height:auto}

.post-list{list-style:none}
.post-card{padding:1.25rem 0;border-bottom:1px solid var(--border)}
.post-card h2{font-size:1.35rem;line-height:1.3}
.post-card h2 a{color:var(--fg);text-decoration:none}
.post-card h2 a:hover{color:var(--accent)}
.post-card .excerpt{color:var(--fg2);margin-top:.4rem}
.meta{color:var(--fg3);font-size:.9rem;display:flex;gap:.75rem;flex-wrap:wrap;margin-top:.25rem}
.categories{display:flex;gap:.4rem;flex-wrap:wrap}
.category,.tag{font-size:.8rem;padding:.05rem .5rem;border:1px solid var(--border);border-radius:999px;color:var(--fg2)}

.empty-state,.not-found,.error-page{text-align:center;padding:4rem 0;color:var(--fg2)}
.empty-state h2,.not-found h1,.error-page h1{color:var(--fg);margin-bottom:.75rem}

.post-header h1{font-size:2.2rem;line-height:1.2;letter-spacing:-.01em}
.post-header .author{display:flex;align-items:center;gap:.6rem;margin-top:1rem}
.post-header .avatar{width:40px;height:40px;border-radius:50%}
.main-image{margin:2rem 0}
.main-image img{border-radius:6px}
.main-image figcaption,.body-image figcaption{font-size:.85rem;color:var(--fg3);text-align:center;margin-top:.4rem}

.post-body{margin-top:2rem}
.post-body>*+*{margin-top:1.1rem}
.post-body .heading-1{font-size:1.9rem;margin-top:2.5rem}
.post-body .heading-2{font-size:1.55rem;margin-top:2.2rem}
.post-body .heading-3{font-size:1.25rem;margin-top:1.8rem}
.post-body .heading-4{font-size:1.05rem;margin-top:1.5rem;text-transform:uppercase;letter-spacing:.04em}
.post-body .quote{border-left:3px solid var(--accent);padding-left:1rem;color:var(--fg2);font-style:italic}
.post-body ul,.post-body ol{padding-left:1.5rem}
.post-body .body-image img{border-radius:4px}
.code-block{font-family:var(--mono);font-size:.9rem}
.code-block pre{overflow-x:auto;padding:1rem;border-radius:6px;background:#2b303b;color:#c0c5ce}
.code-filename{font-size:.8rem;color:var(--fg3);margin-bottom:.25rem}
.post-footer{margin-top:3rem;display:flex;gap:.4rem;flex-wrap:wrap}
"#;
