use std::{
    env, fs,
    path::{Path, PathBuf},
};

use syn::{Expr, ExprLit, ExprMethodCall, File, Lit, visit::Visit};

#[derive(Debug, Clone)]
struct RouteEntry {
    method: String,
    path: String,
    handler: String,
    source: String,
}

struct RouteVisitor {
    source: String,
    routes: Vec<RouteEntry>,
}

impl<'ast> Visit<'ast> for RouteVisitor {
    fn visit_expr_method_call(&mut self, node: &'ast ExprMethodCall) {
        if node.method == "route" {
            let path = node.args.first().and_then(string_literal);
            let handlers = node.args.iter().nth(1).map(method_handlers).unwrap_or_default();
            let line = node.method.span().start().line;

            match path {
                Some(path) => {
                    for (method, handler) in handlers {
                        self.routes.push(RouteEntry {
                            method,
                            path: path.clone(),
                            handler,
                            source: format!("{}:{}", self.source, line),
                        });
                    }
                }
                None => println!(
                    "cargo:warning=route catalog skips non-literal path at {}:{}",
                    self.source, line
                ),
            }
        }

        syn::visit::visit_expr_method_call(self, node);
    }
}

fn string_literal(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(value),
            ..
        }) => Some(value.value()),
        Expr::Paren(expr) => string_literal(&expr.expr),
        Expr::Reference(expr) => string_literal(&expr.expr),
        _ => None,
    }
}

/// `get(a).post(b)` becomes `[("GET", "a"), ("POST", "b")]`.
fn method_handlers(expr: &Expr) -> Vec<(String, String)> {
    let mut found = Vec::new();
    collect_method_handlers(expr, &mut found);
    found.reverse();
    found
}

fn collect_method_handlers(expr: &Expr, out: &mut Vec<(String, String)>) {
    match expr {
        Expr::Call(call) => {
            if let Expr::Path(func) = &*call.func {
                if let Some(segment) = func.path.segments.last() {
                    push_handler(&segment.ident.to_string(), call.args.first(), out);
                }
            }
        }
        Expr::MethodCall(call) => {
            push_handler(&call.method.to_string(), call.args.first(), out);
            collect_method_handlers(&call.receiver, out);
        }
        Expr::Paren(expr) => collect_method_handlers(&expr.expr, out),
        Expr::Reference(expr) => collect_method_handlers(&expr.expr, out),
        _ => {}
    }
}

fn push_handler(name: &str, arg: Option<&Expr>, out: &mut Vec<(String, String)>) {
    let Some(method) = http_method(name) else {
        return;
    };
    let handler = arg.map(handler_name).unwrap_or_else(|| "<unknown>".to_string());
    out.push((method.to_string(), handler));
}

fn handler_name(expr: &Expr) -> String {
    match expr {
        Expr::Path(path) => path
            .path
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect::<Vec<_>>()
            .join("::"),
        _ => "<closure>".to_string(),
    }
}

fn http_method(name: &str) -> Option<&'static str> {
    match name {
        "get" => Some("GET"),
        "post" => Some("POST"),
        "put" => Some("PUT"),
        "delete" => Some("DELETE"),
        "patch" => Some("PATCH"),
        "head" => Some("HEAD"),
        "options" => Some("OPTIONS"),
        "any" => Some("ANY"),
        _ => None,
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn parse_routes(path: &Path, manifest_dir: &Path) -> Vec<RouteEntry> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read {}: {}", path.display(), err));
    let parsed: File = syn::parse_file(&content)
        .unwrap_or_else(|err| panic!("failed to parse {}: {}", path.display(), err));
    let source = path
        .strip_prefix(manifest_dir)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/");

    let mut visitor = RouteVisitor {
        source,
        routes: Vec::new(),
    };
    visitor.visit_file(&parsed);
    visitor.routes
}

fn route_files(routes_dir: &Path) -> Vec<PathBuf> {
    let entries = fs::read_dir(routes_dir)
        .unwrap_or_else(|err| panic!("failed to read {}: {}", routes_dir.display(), err));
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("rs"))
        .collect();
    files.sort();
    files
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("missing CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(&manifest_dir);
    let routes_dir = manifest_path.join("src/routes");
    println!("cargo:rerun-if-changed={}", routes_dir.display());

    let files = route_files(&routes_dir);
    let mut routes = Vec::new();
    for file in &files {
        println!("cargo:rerun-if-changed={}", file.display());
        routes.extend(parse_routes(file, manifest_path));
    }

    routes.sort_by(|a, b| a.path.cmp(&b.path).then(a.method.cmp(&b.method)));

    let mut output = String::from("pub static ROUTES: &[RouteInfo] = &[\n");
    for route in &routes {
        output.push_str(&format!(
            "    RouteInfo {{ method: \"{}\", path: \"{}\", handler: \"{}\", source: \"{}\" }},\n",
            escape(&route.method),
            escape(&route.path),
            escape(&route.handler),
            escape(&route.source),
        ));
    }
    output.push_str("];\n");

    let out_dir = env::var("OUT_DIR").expect("missing OUT_DIR");
    let out_path = Path::new(&out_dir).join("routes_generated.rs");
    fs::write(&out_path, output)
        .unwrap_or_else(|err| panic!("failed to write {}: {}", out_path.display(), err));
}
