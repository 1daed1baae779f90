use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::generator::documents::{SourceDocument, process_sources};
use crate::generator::naming::{DefinitionKind, OperationKind};
use crate::generator::pluck;
use crate::ui::{Colors, colors::IntoComfyColor, term_width};

fn kind_label(kind: DefinitionKind) -> &'static str {
  match kind {
    DefinitionKind::Operation(OperationKind::Query) => "query",
    DefinitionKind::Operation(OperationKind::Mutation) => "mutation",
    DefinitionKind::Operation(OperationKind::Subscription) => "subscription",
    DefinitionKind::Fragment => "fragment",
  }
}

pub async fn list_operations(inputs: &str, colors: &Colors) -> anyhow::Result<()> {
  let mut documents: Vec<SourceDocument> = Vec::new();
  for path in pluck::scan_inputs(inputs)? {
    let content = tokio::fs::read_to_string(&path).await?;
    documents.extend(pluck::pluck_documents(&path, &content)?);
  }

  let mut warnings = Vec::new();
  let sources = process_sources(documents, &mut warnings)?;

  let mut rows = Vec::new();
  for source in &sources {
    for named in &source.operations {
      rows.push((named.derived_name.clone(), kind_label(named.kind), source.source.origin.display().to_string()));
    }
  }
  rows.sort_by(|a, b| a.0.cmp(&b.0));

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut header = Row::new();
  header.add_cell(Cell::new("DOCUMENT").fg(IntoComfyColor::into(colors.label())));
  header.add_cell(Cell::new("KIND").fg(IntoComfyColor::into(colors.label())));
  header.add_cell(Cell::new("ORIGIN").fg(IntoComfyColor::into(colors.label())));
  table.set_header(header);

  for (name, kind, origin) in rows {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(name)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(
      Cell::new(kind)
        .fg(IntoComfyColor::into(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(origin).fg(IntoComfyColor::into(colors.primary())));
    table.add_row(row);
  }

  println!("{table}");

  for warning in &warnings {
    eprintln!("Warning: {warning}");
  }

  Ok(())
}
