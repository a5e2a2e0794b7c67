use std::path::Path;

fn main() {
    validate_segment_table(Path::new("catalogs/segments.tsv"));
    validate_synonym_table(Path::new("catalogs/synonyms.tsv"));
    set_build_dependencies();
}

fn read_table(path: &Path, what: &str) -> String {
    // Ensure the table exists at build time
    assert!(
        path.exists(),
        "\n\n{what} BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the table before building.\n",
        path.display()
    );

    std::fs::read_to_string(path).unwrap_or_else(|e| {
        panic!(
            "\n\n{what} BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            path.display()
        );
    })
}

fn validate_segment_table(path: &Path) {
    let contents = read_table(path, "SEGMENT TABLE");
    let mut lines = contents.lines();

    let header = lines.next().unwrap_or_else(|| {
        panic!(
            "\n\nSEGMENT TABLE BUILD ERROR: Empty file\n\
             Path: {}\n",
            path.display()
        );
    });
    let columns: Vec<&str> = header.split('\t').collect();
    assert!(
        columns.len() == 6,
        "\n\nSEGMENT TABLE BUILD ERROR: Expected 6 columns \
         (species, gene, segment, id, reference_point, sequence)\n\
         Got {} columns in header: {header}\n",
        columns.len()
    );

    let mut rows = 0;
    for (i, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let line_num = i + 2;
        assert!(
            fields.len() == 6,
            "\n\nSEGMENT TABLE BUILD ERROR: Row on line {line_num} has {} fields, expected 6\n",
            fields.len()
        );

        let reference_point: usize = fields[4].parse().unwrap_or_else(|e| {
            panic!(
                "\n\nSEGMENT TABLE BUILD ERROR: Invalid reference_point on line {line_num}: \
                 '{}'\n\
                 Error: {e}\n",
                fields[4]
            );
        });

        let sequence = fields[5];
        assert!(
            sequence.bytes().all(|b| matches!(b, b'A' | b'C' | b'G' | b'T' | b'N')),
            "\n\nSEGMENT TABLE BUILD ERROR: Non-nucleotide character in sequence on line {line_num}\n\
             Sequence: {sequence}\n"
        );

        // Joining rows are trimmed to sequence[..reference_point + 4] at load time
        let segment = fields[2].to_lowercase();
        if segment.starts_with('j') {
            assert!(
                reference_point + 4 <= sequence.len(),
                "\n\nSEGMENT TABLE BUILD ERROR: Joining row '{}' on line {line_num} has \
                 reference_point {reference_point} but only {} bases\n",
                fields[3],
                sequence.len()
            );
        }
        if segment.starts_with('v') {
            assert!(
                reference_point >= 3 && reference_point <= sequence.len(),
                "\n\nSEGMENT TABLE BUILD ERROR: Variable row '{}' on line {line_num} has \
                 reference_point {reference_point} outside 3..={}\n",
                fields[3],
                sequence.len()
            );
        }

        rows += 1;
    }

    assert!(
        rows > 0,
        "\n\nSEGMENT TABLE BUILD ERROR: No data rows found\n\
         Path: {}\n",
        path.display()
    );

    println!("cargo:warning=Validated segment table: {rows} rows");
}

fn validate_synonym_table(path: &Path) {
    let contents = read_table(path, "SYNONYM TABLE");

    for (i, line) in contents.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        assert!(
            fields.len() == 3,
            "\n\nSYNONYM TABLE BUILD ERROR: Row on line {} has {} fields, expected 3 \
             (species, legacy_id, canonical_id)\n",
            i + 1,
            fields.len()
        );
    }
}

fn set_build_dependencies() {
    // Tell cargo to rerun if the embedded tables change
    println!("cargo:rerun-if-changed=catalogs/segments.tsv");
    println!("cargo:rerun-if-changed=catalogs/synonyms.tsv");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
