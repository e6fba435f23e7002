//! Test fixtures: a realistic sample document and a corpus generator for
//! benchmarks

/// A small document exercising the tricky corners of the grammar: preambles
/// with `@` and nested braces inside the value, a string macro, quoted and
/// braced values, brace-wrapped quote characters, and trailing commentary
/// between records.
pub static EXAMPLE_BIB: &[u8] = br#"@preamble{ "\makeatletter" }
@preamble{ "\@ifundefined{url}{\def\url#1{\texttt{#1}}}{}" }
@preamble{ "\makeatother" }

@string{AW = "Addison-Wesley"}

@book{companion,
    author = {Goossens, Michel and Mittelbach, Franck and Samarin, Alexander},
    title = {The {LaTeX} Companion},
    publisher = {Addison-Wesley},
    year = 1993,
}

@article{knuth1984,
    author = "Donald E. Knuth",
    title = "Literate Programming",
    journal = "The Computer Journal",
    year = 1984,
} trailing commentary between records

@pitfall{tricky,
    titleone = "Comments on {"}Filenames and Fonts{"}",
    titletwo = {Comments on "Filenames and Fonts"},
}

@misc{contact,
    howpublished = {mail to who@example.org},
    note = "see also {"}the fine manual{"}",
}
"#;

/// Generate a document with `n` entries for throughput benchmarks
#[must_use]
pub fn generate_bib(n: usize) -> Vec<u8> {
    let mut bib = Vec::with_capacity(n * 300 + 128);
    bib.extend_from_slice(b"@preamble{ \"\\makeatletter\" }\n\n");
    bib.extend_from_slice(b"@string{AW = \"Addison-Wesley\"}\n\n");
    for i in 0..n {
        let entry = format!(
            "@article{{entry{i},\n    author = {{Author, Number {i}}},\n    \
             title = \"On the {{\"}}Structure{{\"}} of Record {i}\",\n    \
             journal = {{Journal of Synthetic Benchmarks}},\n    \
             volume = {},\n    year = {},\n}}\n\n",
            i % 40 + 1,
            1970 + i % 55,
        );
        bib.extend_from_slice(entry.as_bytes());
    }
    bib
}
