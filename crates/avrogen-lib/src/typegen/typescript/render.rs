//! Declaration and type-expression rendering.

use std::collections::HashSet;

use avrogen_core::utils::{js_string_literal, to_pascal_case};

use super::config::{EnumStyle, Optional};
use super::emitter::FileEmitter;
use crate::schema::{EnumSchema, FixedSchema, LogicalType, RecordSchema, Schema};

impl FileEmitter<'_> {
    pub(super) fn render_declaration(&mut self, schema: &Schema) {
        match schema {
            Schema::Record(record) => self.render_record(record),
            Schema::Enum(e) => self.render_enum(e),
            Schema::Fixed(fixed) => self.render_fixed(fixed),
            _ => {}
        }
    }

    fn render_record(&mut self, record: &RecordSchema) {
        self.doc_comment("", record.doc.as_deref().into_iter().map(str::to_owned).collect());
        self.push_export();
        self.output.push_str(&format!("interface {} {{\n", self.ident));

        for field in &record.fields {
            let mut doc: Vec<String> = field.doc.as_deref().into_iter().map(str::to_owned).collect();
            if let Some(default) = &field.default {
                doc.push(format!("@default {default}"));
            }
            self.doc_comment("  ", doc);

            let line = match (field.schema.as_nullable(), self.config.optional) {
                (Some(inner), Optional::Undefined) => {
                    format!("  {}?: {};\n", field.name, self.type_expr(inner))
                }
                (Some(inner), Optional::Null) => {
                    format!("  {}: {} | null;\n", field.name, self.type_expr(inner))
                }
                _ => format!("  {}: {};\n", field.name, self.type_expr(&field.schema)),
            };
            self.output.push_str(&line);
        }

        self.output.push_str("}\n");
    }

    fn render_enum(&mut self, e: &EnumSchema) {
        self.doc_comment("", e.doc.as_deref().into_iter().map(str::to_owned).collect());
        self.push_export();

        match self.config.enums {
            EnumStyle::Union => {
                let body = if e.symbols.is_empty() {
                    "never".to_owned()
                } else {
                    e.symbols
                        .iter()
                        .map(|s| js_string_literal(s))
                        .collect::<Vec<_>>()
                        .join(" | ")
                };
                self.output
                    .push_str(&format!("type {} = {body};\n", self.ident));
            }
            EnumStyle::Enum => {
                self.output
                    .push_str(&format!("enum {} {{\n", self.ident));
                let mut used = HashSet::new();
                for symbol in &e.symbols {
                    let member = unique_member(symbol, &mut used);
                    self.output
                        .push_str(&format!("  {member} = {},\n", js_string_literal(symbol)));
                }
                self.output.push_str("}\n");
            }
        }
    }

    fn render_fixed(&mut self, fixed: &FixedSchema) {
        self.doc_comment("", vec![format!("Fixed size: {} bytes.", fixed.size)]);
        self.push_export();
        self.output
            .push_str(&format!("type {} = Uint8Array;\n", self.ident));
    }

    /// TypeScript type for a schema used in field position.
    pub(super) fn type_expr(&mut self, schema: &Schema) -> String {
        match schema {
            Schema::Null => "null".to_owned(),
            Schema::Boolean => "boolean".to_owned(),
            Schema::Int | Schema::Long | Schema::Float | Schema::Double => "number".to_owned(),
            Schema::Bytes => "Uint8Array".to_owned(),
            Schema::String => "string".to_owned(),
            Schema::Logical(logical, _) => match logical {
                LogicalType::Uuid | LogicalType::Decimal { .. } => "string".to_owned(),
                LogicalType::Date
                | LogicalType::TimeMillis
                | LogicalType::TimeMicros
                | LogicalType::TimestampMillis
                | LogicalType::TimestampMicros => "number".to_owned(),
            },
            Schema::Array(items) => {
                let items_ts = self.type_expr(items);
                if matches!(**items, Schema::Union(ref b) if b.len() > 1) {
                    format!("({items_ts})[]")
                } else {
                    format!("{items_ts}[]")
                }
            }
            Schema::Map(values) => format!("Record<string, {}>", self.type_expr(values)),
            Schema::Union(branches) => branches
                .iter()
                .map(|b| self.type_expr(b))
                .collect::<Vec<_>>()
                .join(" | "),
            Schema::Record(_) | Schema::Enum(_) | Schema::Fixed(_) => match schema.name() {
                Some(name) => self.reference(name),
                None => "unknown".to_owned(),
            },
            Schema::Ref(name) => self.reference(name),
        }
    }

    fn push_export(&mut self) {
        if self.config.export {
            self.output.push_str("export ");
        }
    }

    fn doc_comment(&mut self, indent: &str, lines: Vec<String>) {
        let lines: Vec<String> = lines
            .iter()
            .flat_map(|l| l.lines())
            .map(|l| l.trim_end().replace("*/", "*\\/"))
            .collect();

        match lines.as_slice() {
            [] => {}
            [line] => self.output.push_str(&format!("{indent}/** {line} */\n")),
            _ => {
                self.output.push_str(&format!("{indent}/**\n"));
                for line in &lines {
                    if line.is_empty() {
                        self.output.push_str(&format!("{indent} *\n"));
                    } else {
                        self.output.push_str(&format!("{indent} * {line}\n"));
                    }
                }
                self.output.push_str(&format!("{indent} */\n"));
            }
        }
    }
}

/// Enum member name for `symbol`, suffixed with `_<n>` until unused.
fn unique_member(symbol: &str, used: &mut HashSet<String>) -> String {
    let pascal = to_pascal_case(symbol);
    // Avro symbols are valid identifiers, the PascalCase form may not be
    let base = if pascal.starts_with(|c: char| c.is_ascii_alphabetic()) {
        pascal
    } else {
        symbol.to_owned()
    };

    let mut member = base.clone();
    let mut n = 2;
    while !used.insert(member.clone()) {
        member = format!("{base}_{n}");
        n += 1;
    }
    member
}
