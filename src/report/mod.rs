// SPDX-License-Identifier: PMPL-1.0-or-later

//! Console output

pub mod formatter;

pub use formatter::ReportFormatter;
