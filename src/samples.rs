//! Sample form schemas and submissions for testing and demonstration.
//!
//! Each schema exercises a different part of the vocabulary.

/// Programming survey: a select field at the top level and a section with
/// a textbox and a file field under `<contents>`.
pub fn survey_form() -> &'static str {
    r##"<?xml version="1.0" encoding="UTF-8"?>
<form>
    <field Name="program_language" Type="Enumeration(A,B,C)" Optional="False" FieldType="Select">
        <caption>Pick your programing language</caption>
        <labels>
            <label Name="A">A(+)</label>
            <label Name="B">B</label>
            <label Name="C">C (All flavors except C#)</label>
        </labels>
    </field>
    <section Name="experience" Optional="False">
        <title>Regarding your experience</title>
        <contents>
            <field Name="other" Type="Text([0,200],Lines:4)" Optional="True" FieldType="TextBox">
                <caption>Other programming experiences</caption>
            </field>
            <field Name="code_repos" Type="File" Optional="True" FieldType="File">
                <caption>Upload your code repo's in ZIP.</caption>
            </field>
        </contents>
    </section>
</form>
"##
}

/// Answers for [`survey_form`].
pub fn survey_submission() -> &'static str {
    r##"{
    "program_language": "B",
    "other": "Rust, Python, C++",
    "code_repos": "repo.zip"
}
"##
}

/// Smallest useful form: one textbox.
pub fn minimal_form() -> &'static str {
    r##"<form><field Name="name" FieldType="Textbox"><caption>Your name</caption></field></form>"##
}

/// Schema with elements and field types this build does not know, mixed in
/// with ones it does.
pub fn evolving_form() -> &'static str {
    r##"
<form version="2">
    <banner>Welcome</banner>
    <field Name="rating" FieldType="Slider"><caption>Rate us</caption></field>
    <group>
        <field Name="comment" FieldType="textbox"><caption>Comments</caption></field>
    </group>
</form>
"##
}

/// A section long enough to spill onto several PDF pages.
pub fn multi_page_form() -> String {
    let mut xml = String::from("<form><section><title>Long form</title><contents>");
    for i in 0..60 {
        xml.push_str(&format!(
            r#"<field Name="q{i}" FieldType="Textbox"><caption>Question {i}</caption></field>"#
        ));
    }
    xml.push_str("</contents></section></form>");
    xml
}
