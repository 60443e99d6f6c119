//! 登录流程示例
//!
//! 展示注册时哈希密码、登录时验证密码并签发 Token、之后续期 Token 的完整过程。
//!
//! 运行: CREDKIT_SIGNING_SECRET=... cargo run --example login_flow
//!
//! 未设置环境变量时使用内置的演示密钥。

use std::collections::HashMap;

use credkit::{AuthConfig, CredentialService, CryptoService, TokenPair};
use tracing_subscriber::EnvFilter;

/// 演示用密钥（实际应用中应从环境变量或密钥管理服务获取）
const DEMO_SECRET: &str = "demo-signing-secret-change-me-32b";

/// 模拟的用户服务，代表外部的用户存储
struct UserService {
    users: HashMap<String, String>,
}

impl UserService {
    fn new() -> Self {
        Self {
            users: HashMap::new(),
        }
    }

    async fn register(
        &mut self,
        crypto: &CryptoService,
        username: &str,
        password: &str,
    ) -> Result<(), String> {
        let hash = crypto
            .hash_password_async(password.to_string())
            .await
            .map_err(|e| format!("密码哈希失败: {}", e))?;
        self.users.insert(username.to_string(), hash);
        Ok(())
    }

    async fn login(
        &self,
        crypto: &CryptoService,
        username: &str,
        password: &str,
    ) -> Result<TokenPair, String> {
        let stored = self
            .users
            .get(username)
            .ok_or_else(|| "用户名或密码错误".to_string())?;

        let ok = crypto
            .verify_password_async(password.to_string(), stored.clone())
            .await
            .map_err(|e| format!("密码验证失败: {}", e))?;
        if !ok {
            return Err("用户名或密码错误".to_string());
        }

        crypto
            .issue_tokens(username)
            .map_err(|e| format!("Token 签发失败: {}", e))
    }
}

fn preview(token: &str) -> &str {
    &token[..token.len().min(40)]
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("credkit=debug".parse().unwrap()))
        .init();

    println!("=== credkit 登录流程示例 ===\n");

    let config = AuthConfig::from_env().unwrap_or_else(|_| AuthConfig::new(DEMO_SECRET));
    let crypto = CryptoService::from_config(&config).expect("signing secret should be valid");
    let mut users = UserService::new();

    // 1. 注册
    println!("📝 注册用户 alice...");
    users
        .register(&crypto, "alice", "correct horse battery staple")
        .await
        .expect("registration should succeed");
    println!("   ✅ 注册成功\n");

    // 2. 错误密码登录
    println!("🔐 使用错误密码登录...");
    match users.login(&crypto, "alice", "wrong password").await {
        Ok(_) => println!("   登录成功\n"),
        Err(e) => println!("   ❌ {}\n", e),
    }

    // 3. 正确密码登录
    println!("🔐 使用正确密码登录...");
    let tokens = match users
        .login(&crypto, "alice", "correct horse battery staple")
        .await
    {
        Ok(t) => {
            println!("   Access Token: {}...", preview(&t.access_token));
            println!("   Access 过期时间: {}", t.access_expires_at);
            println!("   Refresh 过期时间: {}\n", t.refresh_expires_at);
            t
        }
        Err(e) => {
            println!("   ❌ 登录失败: {}\n", e);
            return;
        }
    };

    // 4. 验证 Access Token
    println!("🔍 验证 Access Token...");
    match crypto.validate_access_token(&tokens.access_token) {
        Ok(claims) => println!("   ✅ Token 有效, 用户: {}\n", claims.subject()),
        Err(e) => println!("   ❌ {}\n", e),
    }

    // 5. 用 Access Token 续期（应失败）
    println!("🔄 使用 Access Token 续期...");
    match crypto.renew_tokens(&tokens.access_token) {
        Ok(_) => println!("   续期成功\n"),
        Err(e) => println!("   ❌ {}\n", e),
    }

    // 6. 用 Refresh Token 续期
    println!("🔄 使用 Refresh Token 续期...");
    match crypto.renew_tokens(&tokens.refresh_token) {
        Ok(renewed) => {
            println!("   ✅ 续期成功");
            println!("   新 Access Token: {}...\n", preview(&renewed.access_token));
        }
        Err(e) => println!("   ❌ {}\n", e),
    }

    // 7. 无效 Token
    println!("🔍 验证无效 Token...");
    match crypto.renew_tokens("invalid.token.here") {
        Ok(_) => println!("   Token 有效\n"),
        Err(e) => println!("   ❌ {}\n", e),
    }

    println!("=== 示例结束 ===");
}
