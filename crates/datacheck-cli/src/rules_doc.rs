use datacheck_core::RuleKind;

struct RuleDoc {
    summary: &'static str,
    params: &'static [&'static str],
    example: &'static str,
}

fn rule_doc(kind: RuleKind) -> RuleDoc {
    match kind {
        RuleKind::Schema => RuleDoc {
            summary: "Every required column is present in the header",
            params: &[
                "requiredColumns: list of column names",
                "exact: bool (default false), extra columns also fail",
            ],
            example: "requiredColumns = [\"id\", \"name\", \"email\"]",
        },
        RuleKind::RowCount => RuleDoc {
            summary: "Row count (header excluded) lies within [min, max]",
            params: &["min: integer >= 0", "max: integer >= min"],
            example: "min = 24\nmax = 24",
        },
        RuleKind::NullAbsence => RuleDoc {
            summary: "No NULL (empty) cell in the listed columns",
            params: &["columns: non-empty list of column names"],
            example: "columns = [\"age\", \"salary\"]",
        },
        RuleKind::Uniqueness => RuleDoc {
            summary: "No two rows are equal on the projected columns (NULL equals NULL)",
            params: &["columns: optional non-empty list, default every column"],
            example: "columns = [\"id\", \"email\"]",
        },
        RuleKind::TextCase => RuleDoc {
            summary: "Every text cell of the column is entirely lower (or upper) case",
            params: &["column: column name", "case: Lower | Upper"],
            example: "column = \"status\"\ncase = \"Lower\"",
        },
        RuleKind::SortOrder => RuleDoc {
            summary: "Adjacent non-null cells of the column are in order, numbers before text",
            params: &[
                "column: column name",
                "order: Ascending | Descending",
                "nulls: optional First | Last, where NULLs must sit (unset: any NULL fails)",
            ],
            example: "column = \"name\"\norder = \"Ascending\"",
        },
        RuleKind::AllowedValues => RuleDoc {
            summary: "Every non-null cell of the column is one of the listed values",
            params: &[
                "column: column name",
                "values: non-empty list of strings",
                "ignoreCase: bool (default false)",
            ],
            example: "column = \"status\"\nvalues = [\"active\", \"inactive\"]",
        },
        RuleKind::Pattern => RuleDoc {
            summary: "Every non-null cell of the column matches the regular expression",
            params: &[
                "column: column name",
                "pattern: regular expression",
                "caseInsensitive: bool (default false)",
            ],
            example: "column = \"email\"\npattern = '^[\\w.-]+@[\\w.-]+\\.\\w+$'",
        },
        RuleKind::RowCountDelta => RuleDoc {
            summary: "Reference rows minus dataset rows lies within [min, max]",
            params: &["min: integer", "max: integer >= min"],
            example: "min = 1\nmax = 1",
        },
        RuleKind::UniquenessDelta => RuleDoc {
            summary: "The dataset is the reference with exactly its duplicates removed",
            params: &["columns: optional non-empty list, default every column"],
            example: "columns = [\"id\", \"email\"]",
        },
    }
}

fn rule_section(kind: RuleKind) -> String {
    let doc = rule_doc(kind);
    let mut out = format!("{} (alias: {})\n", kind.canonical_name(), kind.alias());
    out.push_str(&format!("  {}\n", doc.summary));
    if kind.needs_reference() {
        out.push_str("  Requires a reference dataset ([dataset].reference or --reference)\n");
    }
    out.push_str("  Parameters:\n");
    for param in doc.params {
        out.push_str(&format!("    - {}\n", param));
    }
    out.push_str("  TOML Example:\n    [[check]]\n");
    out.push_str(&format!("    rule = \"{}\"\n", kind.alias()));
    for line in doc.example.lines() {
        out.push_str(&format!("    {}\n", line));
    }
    out
}

pub fn rules_documentation() -> String {
    let title = "DATACHECK VALIDATION RULES";
    let rule = "=".repeat(78);
    let mut out = format!("{}\n{:^78}\n{}\n", rule, title, rule);
    out.push_str(
        "\nOutcomes: PASS the invariant holds, FAIL the data violates it,\n\
         ERROR the check could not be evaluated (unknown rule, bad parameters,\n\
         missing column or reference).\n\
         Empty fields are NULL. Text and value rules skip NULL cells.\n\
         SortOrder fails on NULL cells unless nulls = First | Last is set.\n",
    );
    for kind in RuleKind::ALL {
        out.push('\n');
        out.push_str(&rule_section(kind));
    }
    out
}

/// Print the catalog of every available rule
pub fn print_rules_documentation() {
    println!("{}", rules_documentation());
}
