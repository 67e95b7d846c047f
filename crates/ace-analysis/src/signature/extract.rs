//! Conservative syntactic extraction of exports and relative imports.

use std::sync::LazyLock;

use regex::Regex;

static EXPORT_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"export\s+(?:async\s+)?(?:function|const|let|var|class|interface|type|enum)\s+(\w+)")
        .ok()
});

static IMPORT_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"import\s+.*?from\s+['"]([^'"]+)['"]"#).ok());

/// Names declared with `export [async] function|const|let|var|class|interface|type|enum`,
/// sorted.
pub fn extract_exports(content: &str) -> Vec<String> {
    let Some(re) = EXPORT_RE.as_ref() else {
        return Vec::new();
    };
    let mut exports: Vec<String> = re
        .captures_iter(content)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect();
    exports.sort();
    exports
}

/// Specifiers of `import … from '<spec>'` statements that start with `.` or
/// `/`, sorted. Package imports are dropped.
pub fn extract_imports(content: &str) -> Vec<String> {
    let Some(re) = IMPORT_RE.as_ref() else {
        return Vec::new();
    };
    let mut imports: Vec<String> = re
        .captures_iter(content)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .filter(|spec| spec.starts_with('.') || spec.starts_with('/'))
        .map(str::to_string)
        .collect();
    imports.sort();
    imports
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"
import { z } from 'zod';
import { hashObject } from './utils/hash';
import type { Signature } from "../../types/constraints";
import Absolute from '/lib/shared/absolute';

export async function generate() {}
export const VERSION = '1.0.0';
export interface Options {}
export type Mode = 'a' | 'b';
export enum Layer { Api }
export class Engine {}
export default function ignored() {}
const notExported = 1;
"#;

    #[test]
    fn exports_are_sorted_declaration_names() {
        assert_eq!(
            extract_exports(SOURCE),
            vec!["Engine", "Layer", "Mode", "Options", "VERSION", "generate"]
        );
    }

    #[test]
    fn only_relative_imports_are_kept() {
        assert_eq!(
            extract_imports(SOURCE),
            vec!["../../types/constraints", "./utils/hash", "/lib/shared/absolute"]
        );
    }

    #[test]
    fn multiline_import_clauses_are_not_matched() {
        let src = "import {\n  a,\n  b,\n} from './multi';\n";
        assert!(extract_imports(src).is_empty());
    }
}
