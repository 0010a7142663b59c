use super::TextArea;
use super::PASSWORD_MASK;

#[test]
fn it_pastes_multiple_lines() {
    let mut textarea = TextArea::default();
    TextArea::paste(&mut textarea, "Jane Doe\r\nSenior Engineer\nRust, Go");

    assert_eq!(
        textarea.lines(),
        vec!["Jane Doe", "Senior Engineer", "Rust, Go"]
    );
    assert_eq!(
        TextArea::content(&textarea),
        "Jane Doe\nSenior Engineer\nRust, Go"
    );
}

#[test]
fn it_masks_passwords() {
    let textarea = TextArea::password("Password");

    assert_eq!(textarea.mask_char(), Some(PASSWORD_MASK));
}
