use std::env;
use std::path::PathBuf;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

pub fn insta_snapshot<F: FnOnce()>(f: F) {
    let mut settings = insta::Settings::clone_current();
    let snapshot_path = env::current_dir().unwrap().join("./test/snapshots");
    settings.set_snapshot_path(snapshot_path);
    settings.bind(f);
}

/// Builds an unsigned JWT around the given payload. The signature segment is
/// junk, which is fine since the client never verifies it.
pub fn jwt_fixture(payload: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    return format!("{header}.{body}.c2lnbmF0dXJl");
}

pub fn user_token_fixture() -> String {
    return jwt_fixture(serde_json::json!({
        "user": { "id": "64f0c0ffee", "isGuest": false },
        "iat": 1700000000,
        "exp": 1700360000
    }));
}

pub fn guest_token_fixture() -> String {
    return jwt_fixture(serde_json::json!({
        "user": { "id": "guest-1", "isGuest": true },
        "iat": 1700000000,
        "exp": 1700003600
    }));
}

/// Returns a unique path under the system temp dir. Nothing is created.
pub fn temp_path(name: &str) -> PathBuf {
    return env::temp_dir()
        .join(format!("career-agent-test-{}", uuid::Uuid::new_v4()))
        .join(name);
}

pub fn codeblock_fixture() -> &'static str {
    return r#"
Here's a STAR story outline you can adapt.

```markdown
**Situation**: Legacy deploys took two hours.
**Action**: Built a CI pipeline.
**Result**: Deploys dropped to ten minutes.
```

And a quick script to count keywords in your resume.

```python
for word in ["rust", "tokio"]:
    print(word, resume.count(word))
```

That's it!
"#
    .trim();
}
