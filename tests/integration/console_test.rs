//! Integration tests for the console session and renderers

use wechat_bot_console::handlers::{render, ConsoleSession, Flow};
use wechat_bot_console::models::PageParams;

use crate::helpers::*;

async fn line(session: &mut ConsoleSession, input: &str) -> String {
    match session.handle_line(input).await {
        Flow::Continue(output) => output,
        Flow::Quit => panic!("unexpected quit on {:?}", input),
    }
}

async fn loaded_session(ctx: &TestContext) -> ConsoleSession {
    let mut session = ctx.session();
    session.page_mut().refresh();
    settle(session.page_mut()).await;
    session
}

#[tokio::test]
async fn test_empty_table_renders_zero_total() {
    let ctx = TestContext::new();
    let session = loaded_session(&ctx).await;

    let screen = render::render_page(session.page());
    assert!(screen.contains("企业微信机器人管理"));
    assert!(screen.contains("暂无数据"));
    assert!(screen.contains("共 0 条"));
    assert!(!screen.contains("加载中"));
}

#[tokio::test]
async fn test_table_shows_rows_and_status() {
    let ctx = TestContext::with_api(MockBotConfigApi::with_records(12));
    let session = loaded_session(&ctx).await;

    let screen = render::render_table(session.page());
    assert!(screen.contains("ww3"));
    assert!(screen.contains("● 启用"));
    assert!(screen.contains("2024-03-01 08:05:09"));
    assert!(screen.contains("共 12 条"));
    assert!(screen.contains("第 1/2 页"));
    // long callback URLs are shortened in the table
    assert!(!screen.contains("http://callback.example.com/api/wechat/callback/k3"));
    assert!(screen.contains("..."));
}

#[tokio::test]
async fn test_loading_marker_while_request_in_flight() {
    let ctx = TestContext::new();
    let mut session = ctx.session();

    let release = ctx.api.gate_page(1);
    session.page_mut().refresh();
    assert!(render::render_table(session.page()).contains("加载中..."));

    release.send(()).unwrap();
    let event = next_event(session.page_mut()).await;
    let screen = session.handle_event(event);
    assert!(!screen.contains("加载中..."));
    assert!(screen.contains("共 0 条"));
}

#[tokio::test]
async fn test_help_and_unknown_commands() {
    let ctx = TestContext::new();
    let mut session = ConsoleSession::new(ctx.page_in("en"));

    let help = line(&mut session, "help").await;
    assert!(help.contains("Commands"));
    assert!(help.contains("delete <id>"));
    assert!(help.contains("encodingAesKey"));

    let unknown = line(&mut session, "frobnicate").await;
    assert!(unknown.contains("Unknown command: frobnicate"));

    let invalid = line(&mut session, "page two").await;
    assert!(invalid.contains("Invalid argument: two"));

    let field = line(&mut session, "set callbackUrl x").await;
    assert!(field.contains("Unknown field: callbackUrl"));

    assert_eq!(line(&mut session, "   ").await, "");
    assert!(ctx.api.calls().is_empty());
}

#[tokio::test]
async fn test_help_field_list_is_translated() {
    let ctx = TestContext::new();
    let mut session = ctx.session();

    let help = line(&mut session, "help").await;
    assert!(help.contains("可用命令"));
    assert!(help.contains("字段: botKey, corpId"));
    assert!(!help.contains("fields:"));
}

#[tokio::test]
async fn test_create_through_commands() {
    let ctx = TestContext::new();
    ctx.api.set_generated_key("BOT-CLI");
    let mut session = loaded_session(&ctx).await;

    let form = line(&mut session, "add").await;
    assert!(form.contains("新增机器人配置"));
    settle(session.page_mut()).await;

    for input in [
        "set corpId c1",
        "set agent_id a1",
        "set token t",
        "set encodingAesKey e",
        "set agentIdRef ref1",
    ] {
        line(&mut session, input).await;
    }
    let form = render::render_form(session.page()).unwrap();
    assert!(form.contains("BOT-CLI"));
    assert!(form.contains("c1"));

    let output = line(&mut session, "submit").await;
    assert!(output.contains("创建成功"));
    assert!(!session.page().modal().is_open());

    settle(session.page_mut()).await;
    assert_eq!(session.page().context().total, 1);
    assert_eq!(ctx.api.records()[0].bot_key, "BOT-CLI");
}

#[tokio::test]
async fn test_submit_with_missing_fields_shows_errors() {
    let ctx = TestContext::new();
    let mut session = loaded_session(&ctx).await;
    line(&mut session, "add").await;
    settle(session.page_mut()).await;

    let output = line(&mut session, "submit").await;
    assert!(output.contains("✖ 请输入企业ID"));
    assert!(output.contains("! 请输入Token"));
    assert!(session.page().modal().is_open());
    assert_eq!(ctx.api.count(Operation::Create), 0);
}

#[tokio::test]
async fn test_edit_form_masks_secrets() {
    let mut record = bot_config(4);
    record.token = "secret-token".to_string();
    record.encoding_aes_key = "aes-key-value".to_string();
    let api = MockBotConfigApi::new();
    api.seed(vec![record]);
    let ctx = TestContext::with_api(api);
    let mut session = loaded_session(&ctx).await;

    let form = line(&mut session, "edit 4").await;
    assert!(form.contains("编辑机器人配置 #4"));
    assert!(form.contains("ww4"));
    assert!(!form.contains("secret-token"));
    assert!(!form.contains("aes-key-value"));
    assert!(form.contains("••••••••"));

    line(&mut session, "cancel").await;
    assert!(!session.page().modal().is_open());
}

#[tokio::test]
async fn test_delete_needs_yes() {
    let ctx = TestContext::with_api(MockBotConfigApi::with_records(5));
    let mut session = loaded_session(&ctx).await;

    assert_eq!(line(&mut session, "delete 5").await, "");
    assert!(session.awaiting_confirmation());
    assert!(session.prompt().contains("确定要删除这个机器人配置吗？"));
    assert!(session.prompt().contains("(y/N)"));

    // anything but yes cancels, even another command
    let output = line(&mut session, "delete 4").await;
    assert!(output.contains("ℹ 已取消删除"));
    assert!(!session.awaiting_confirmation());
    assert_eq!(ctx.api.count(Operation::Delete), 0);

    line(&mut session, "delete 5").await;
    let output = line(&mut session, "y").await;
    assert!(output.contains("删除成功"));
    assert_eq!(ctx.api.count(Operation::Delete), 1);

    settle(session.page_mut()).await;
    assert!(session.page().context().find(5).is_none());
}

#[tokio::test]
async fn test_failed_delete_keeps_row_visible() {
    let ctx = TestContext::with_api(MockBotConfigApi::with_records(5));
    ctx.api.fail(Operation::Delete);
    let mut session = loaded_session(&ctx).await;

    line(&mut session, "delete 5").await;
    let output = line(&mut session, "yes").await;
    assert!(output.contains("删除失败"));
    assert!(session.page().context().find(5).is_some());
}

#[tokio::test]
async fn test_server_text_cannot_emit_escapes() {
    let mut record = bot_config(6);
    record.bot_key = "k6\x1b[2J".to_string();
    record.agent_id_ref = "ref\x1b]52;c;aGk=\x07".to_string();
    record.callback_url = Some("http://cb\x1b[31m.example.com".to_string());
    let api = MockBotConfigApi::new();
    api.seed(vec![record]);
    let ctx = TestContext::with_api(api);
    let mut session = loaded_session(&ctx).await;

    let table = render::render_table(session.page());
    let details = line(&mut session, "show 6").await;
    let form = line(&mut session, "edit 6").await;

    for screen in [&table, &details, &form] {
        assert!(!screen.contains('\x1b'));
        assert!(!screen.contains('\x07'));
    }
    assert!(table.contains("k6[2J"));
    assert!(details.contains("http://cb[31m.example.com"));
}

#[tokio::test]
async fn test_show_and_copy() {
    let ctx = TestContext::with_api(MockBotConfigApi::with_records(3));
    let mut session = loaded_session(&ctx).await;

    let details = line(&mut session, "show 3").await;
    assert!(details.contains("机器人配置详情"));
    assert!(details.contains("http://callback.example.com/api/wechat/callback/k3"));
    assert!(details.contains("ref3"));

    let copied = line(&mut session, "copy 3").await;
    assert!(copied.contains("回调URL已复制到剪贴板"));
    assert_eq!(
        ctx.clipboard.contents().as_deref(),
        Some("http://callback.example.com/api/wechat/callback/k3")
    );
}

#[tokio::test]
async fn test_search_and_page_commands() {
    let ctx = TestContext::with_api(MockBotConfigApi::with_records(30));
    let mut session = loaded_session(&ctx).await;

    line(&mut session, "search k2").await;
    settle(session.page_mut()).await;
    line(&mut session, "page 2").await;
    settle(session.page_mut()).await;

    assert_eq!(ctx.api.page_calls().last(), Some(&PageParams::new(2, 10, "k2")));

    let output = line(&mut session, "size 7").await;
    assert!(!output.is_empty());
    assert_eq!(session.page().context().page_size, 10);
}

#[tokio::test]
async fn test_quit() {
    let ctx = TestContext::new();
    let mut session = ctx.session();
    assert_eq!(session.handle_line("quit").await, Flow::Quit);
}
