// file: src/query/prompt.rs
// description: fixed extraction prompt template for tag/date extraction
// reference: instruction prompt with a worked example

use chrono::NaiveDate;

pub fn build_extraction_prompt(query: &str, today: NaiveDate) -> String {
    format!(
        r#"Given the following news search query, extract relevant search tags and date information.
Query: "{query}"

Please format your response exactly as follows:
Tags: [list of tags]
Date: date in DD-MM-YYYY format (if mentioned)

For example:
Query: "cricket matches in gujarat last week"
Tags: [cricket, matches, gujarat]
Date: {example_date}
"#,
        query = query.trim(),
        example_date = today.format("%d-%m-%Y")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_query_and_example_date() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 8).unwrap();
        let prompt = build_extraction_prompt("  flood news in surat ", today);

        assert!(prompt.contains("Query: \"flood news in surat\""));
        assert!(prompt.contains("Date: 08-06-2024"));
        assert!(prompt.contains("Tags: [list of tags]"));
    }
}
