// Sample login pages with known provider evidence

/// Only a structural google button
pub const GOOGLE_ONLY_PAGE: &str = r#"<button data-provider="google">Sign in</button>"#;

/// Typical SaaS login page offering several providers through different evidence
pub const MIXED_LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Log in to Acme</title></head>
<body>
  <form action="/session" method="post">
    <input type="email" name="email">
    <input type="password" name="password">
    <button type="submit">Log in</button>
  </form>
  <div class="oauth">
    <a href="https://accounts.google.com/o/oauth2/auth?client_id=1">Google</a>
    <button class="btn btn-dark">Continue with GitHub</button>
    <a class="apple-signin-button" href="/auth/apple"> Sign in with Apple </a>
    <div role="button" tabindex="0">Sign in with Microsoft</div>
  </div>
</body>
</html>"#;

/// Provider buttons present in markup but never rendered
pub const HIDDEN_PROVIDERS_PAGE: &str = r#"<html><body>
  <div style="display: none">
    <button data-provider="github">GitHub</button>
  </div>
  <button data-provider="discord" hidden>Discord</button>
  <p>Sign in with your email.</p>
</body></html>"#;

/// Page without any OAuth option
pub const PLAIN_LOGIN_PAGE: &str = r#"<html><head><title>Members</title></head><body>
  <form><input name="user"><input type="password" name="pass"><button>Sign in</button></form>
  <a href="/forgot">Forgot password?</a>
</body></html>"#;
