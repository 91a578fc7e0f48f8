// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The seqfetch authors

use std::fmt;

// What efetch should return. Each variant maps to one (rettype, retmode) pair; see the E-utilities
// table of valid values for nucleotide and protein databases.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RecordFormat {
    Fasta,
    GenBank,
    GenBankWithParts,
    Accession,
    NativeXml,
}

impl RecordFormat {
    pub fn rettype(&self) -> &'static str {
        match self {
            RecordFormat::Fasta => "fasta",
            RecordFormat::GenBank => "gb",
            RecordFormat::GenBankWithParts => "gbwithparts",
            RecordFormat::Accession => "acc",
            RecordFormat::NativeXml => "native",
        }
    }

    pub fn retmode(&self) -> &'static str {
        match self {
            RecordFormat::NativeXml => "xml",
            _ => "text",
        }
    }
}

impl fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.rettype(), self.retmode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fasta_is_text() {
        assert_eq!(RecordFormat::Fasta.rettype(), "fasta");
        assert_eq!(RecordFormat::Fasta.retmode(), "text");
    }

    #[test]
    fn test_xml_display() {
        assert_eq!(RecordFormat::NativeXml.to_string(), "native/xml");
        assert_eq!(RecordFormat::GenBank.to_string(), "gb/text");
    }
}
