use chrono::{Datelike, Utc};

const ADMIN_BASE_STYLES: &str = r#"
        :root { color-scheme: light; }
        body { font-family: "Helvetica Neue", Arial, sans-serif; margin: 0; background: #f8fafc; color: #0f172a; }
        header { background: #ffffff; padding: 2rem 1.5rem; border-bottom: 1px solid #e2e8f0; }
        .header-bar { display: flex; justify-content: space-between; align-items: center; flex-wrap: wrap; gap: 1rem; }
        .logout-link { display: inline-flex; align-items: center; gap: 0.35rem; color: #0f172a; background: #fee2e2; border: 1px solid #fecaca; padding: 0.45rem 0.9rem; border-radius: 999px; text-decoration: none; font-weight: 600; }
        .logout-link:hover { background: #fecaca; border-color: #fca5a5; }
        main { padding: 2rem 1.5rem; max-width: 1100px; margin: 0 auto; box-sizing: border-box; }
        .stats-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 1rem; margin-bottom: 2rem; }
        .stat-card { background: #ffffff; border-radius: 12px; border: 1px solid #e2e8f0; padding: 1.25rem; box-shadow: 0 12px 30px rgba(15, 23, 42, 0.06); }
        .stat-card h3 { margin: 0 0 0.5rem; font-size: 0.9rem; color: #475569; font-weight: 600; }
        .stat-card .value { font-size: 1.8rem; font-weight: 700; }
        .tab-row { display: flex; gap: 0.5rem; margin-bottom: 1rem; flex-wrap: wrap; }
        .tab-row button { padding: 0.6rem 1.1rem; border: 1px solid #e2e8f0; border-radius: 8px; background: #ffffff; color: #0f172a; font-weight: 600; cursor: pointer; }
        .tab-row button.active { background: #2563eb; border-color: #2563eb; color: #ffffff; }
        .panel { background: #ffffff; border-radius: 12px; border: 1px solid #e2e8f0; padding: 1.5rem; box-shadow: 0 18px 40px rgba(15, 23, 42, 0.08); }
        table { width: 100%; border-collapse: collapse; margin-top: 1rem; }
        th, td { padding: 0.65rem 0.85rem; border-bottom: 1px solid #e2e8f0; text-align: left; font-size: 0.92rem; }
        th { background: #f1f5f9; color: #0f172a; font-weight: 600; }
        .search-row { display: flex; gap: 0.5rem; margin-top: 1rem; }
        .search-row input { flex: 1; padding: 0.65rem; border-radius: 8px; border: 1px solid #cbd5f5; background: #f8fafc; }
        .search-row button { padding: 0.65rem 1.1rem; border: none; border-radius: 8px; background: #2563eb; color: #ffffff; font-weight: 600; cursor: pointer; }
        .note { color: #475569; font-size: 0.95rem; }
        .app-footer { margin-top: 3rem; text-align: center; font-size: 0.85rem; color: #94a3b8; }
        @media (max-width: 768px) {
            header { padding: 1.5rem 1rem; }
            main { padding: 1.5rem 1rem; }
            table { font-size: 0.85rem; }
            th, td { padding: 0.5rem; }
        }
"#;

const DASHBOARD_SCRIPT: &str = r#"
    <script>
    async function fetchJson(url) {
        const res = await fetch(url, { credentials: 'same-origin' });
        if (res.redirected) { window.location = res.url; return null; }
        if (!res.ok) { throw new Error('request failed: ' + res.status); }
        return res.json();
    }

    function setText(id, value) {
        document.getElementById(id).textContent = value;
    }

    function renderRows(tbodyId, rows, columns) {
        const tbody = document.getElementById(tbodyId);
        tbody.innerHTML = '';
        for (const row of rows) {
            const tr = document.createElement('tr');
            for (const col of columns) {
                const td = document.createElement('td');
                const value = row[col];
                td.textContent = value === null || value === undefined ? '' :
                    (typeof value === 'object' ? JSON.stringify(value) : String(value));
                tr.appendChild(td);
            }
            tbody.appendChild(tr);
        }
    }

    async function loadStats() {
        const stats = await fetchJson('/admin/api/stats');
        if (!stats) return;
        setText('stat-enquiries', stats.total_enquiries);
        setText('stat-quotations', stats.total_quotations);
        setText('stat-lois', stats.total_lois);
        setText('stat-visits-7d', stats.visits_7d);
        setText('stat-visits-30d', stats.visits_30d);
    }

    async function loadEnquiries() {
        const rows = await fetchJson('/admin/api/enquiries');
        if (rows) renderRows('enquiry-rows', rows, ['ticket_no', 'name', 'email', 'message', 'created_at']);
    }

    async function loadQuotations() {
        const rows = await fetchJson('/admin/api/quotations');
        if (rows) renderRows('quotation-rows', rows, ['ticket_no', 'company', 'name', 'email', 'product', 'quantity', 'delivery', 'expires_at']);
    }

    async function loadLois() {
        const rows = await fetchJson('/admin/api/loi-submissions');
        if (rows) renderRows('loi-rows', rows, ['company_name', 'rep_name', 'email', 'product', 'quantity', 'submission_date']);
    }

    async function searchTicket() {
        const ticket = document.getElementById('ticket-input').value.trim();
        if (!ticket) return;
        const res = await fetch('/admin/api/quotations/search/ticket/' + encodeURIComponent(ticket), { credentials: 'same-origin' });
        if (res.ok) {
            const row = await res.json();
            renderRows('quotation-rows', [row], ['ticket_no', 'company', 'name', 'email', 'product', 'quantity', 'delivery', 'expires_at']);
        } else {
            renderRows('quotation-rows', [], []);
            alert('No quotation found for ' + ticket);
        }
    }

    document.querySelectorAll('.tab-row button').forEach((button) => {
        button.addEventListener('click', () => {
            document.querySelectorAll('.tab-row button').forEach((b) => b.classList.remove('active'));
            document.querySelectorAll('.tab-panel').forEach((p) => p.style.display = 'none');
            button.classList.add('active');
            document.getElementById(button.dataset.panel).style.display = 'block';
        });
    });
    document.getElementById('ticket-search').addEventListener('click', searchTicket);

    loadStats().catch(console.error);
    loadEnquiries().catch(console.error);
    loadQuotations().catch(console.error);
    loadLois().catch(console.error);
    </script>
"#;

pub fn render_login_page(error: Option<&str>) -> String {
    let footer = render_footer();
    let error_html = error
        .map(|message| format!(r#"<p class="error">{}</p>"#, escape_html(message)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>QuoteDesk Admin</title>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="robots" content="noindex,nofollow">
    <style>
        :root {{ color-scheme: light; }}
        body {{ font-family: "Helvetica Neue", Arial, sans-serif; display: flex; flex-direction: column; align-items: center; justify-content: center; min-height: 100vh; margin: 0; background: #f1f5f9; color: #0f172a; padding: 1.5rem; box-sizing: border-box; gap: 1.5rem; }}
        main {{ width: 100%; max-width: 420px; display: flex; flex-direction: column; align-items: center; gap: 1.5rem; }}
        .panel {{ background: #ffffff; padding: 2.5rem 2.25rem; border-radius: 18px; box-shadow: 0 20px 60px rgba(15, 23, 42, 0.08); width: 100%; border: 1px solid #e2e8f0; box-sizing: border-box; }}
        h1 {{ margin: 0 0 1rem; font-size: 1.6rem; text-align: center; }}
        p.description {{ margin: 0 0 1.5rem; color: #475569; text-align: center; font-size: 0.95rem; }}
        p.error {{ margin: 0 0 1rem; color: #b91c1c; text-align: center; font-weight: 600; }}
        label {{ display: block; margin-top: 1.2rem; font-weight: 600; color: #0f172a; }}
        input {{ width: 100%; padding: 0.85rem; margin-top: 0.65rem; border-radius: 10px; border: 1px solid #cbd5f5; background: #f8fafc; color: #0f172a; font-size: 1rem; box-sizing: border-box; }}
        input:focus {{ outline: none; border-color: #2563eb; box-shadow: 0 0 0 3px rgba(37, 99, 235, 0.15); }}
        button {{ margin-top: 2rem; width: 100%; padding: 0.95rem; border: none; border-radius: 10px; background: #2563eb; color: #ffffff; font-weight: 600; font-size: 1.05rem; cursor: pointer; transition: background 0.15s ease; }}
        button:hover {{ background: #1d4ed8; }}
        .app-footer {{ margin-top: 2.5rem; text-align: center; font-size: 0.85rem; color: #64748b; }}
    </style>
</head>
<body>
    <main>
        <section class="panel">
            <h1>QuoteDesk Admin</h1>
            <p class="description">Sign in with the operator account.</p>
            {error_html}
            <form method="post" action="/admin/login">
                <label for="username">Username</label>
                <input id="username" name="username" required>
                <label for="password">Password</label>
                <input id="password" type="password" name="password" required>
                <button type="submit">Sign in</button>
            </form>
        </section>
        {footer}
    </main>
</body>
</html>"#,
        error_html = error_html,
        footer = footer,
    )
}

pub fn render_dashboard_page(username: &str) -> String {
    let footer = render_footer();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>QuoteDesk Dashboard</title>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="robots" content="noindex,nofollow">
    <style>
{styles}
    </style>
</head>
<body>
    <header>
        <div class="header-bar">
            <h1>QuoteDesk Dashboard</h1>
            <div style="display:flex; gap:0.75rem; align-items:center; flex-wrap:wrap;">
                <span class="note">Signed in as {username}</span>
                <a class="logout-link" href="/admin/logout">Log out</a>
            </div>
        </div>
        <p class="note">Inbound enquiries, quotation requests and LOI submissions.</p>
    </header>
    <main>
        <div class="stats-grid">
            <div class="stat-card"><h3>Enquiries</h3><div class="value" id="stat-enquiries">–</div></div>
            <div class="stat-card"><h3>Quotations</h3><div class="value" id="stat-quotations">–</div></div>
            <div class="stat-card"><h3>LOI Submissions</h3><div class="value" id="stat-lois">–</div></div>
            <div class="stat-card"><h3>Visits (7d)</h3><div class="value" id="stat-visits-7d">–</div></div>
            <div class="stat-card"><h3>Visits (30d)</h3><div class="value" id="stat-visits-30d">–</div></div>
        </div>
        <div class="tab-row">
            <button class="active" data-panel="panel-quotations">Quotations</button>
            <button data-panel="panel-enquiries">Enquiries</button>
            <button data-panel="panel-lois">LOI Submissions</button>
        </div>
        <section class="panel tab-panel" id="panel-quotations">
            <h2>Quotation requests</h2>
            <div class="search-row">
                <input id="ticket-input" placeholder="QT-YYYYMMDD-XXXXX">
                <button id="ticket-search" type="button">Search ticket</button>
            </div>
            <table>
                <thead><tr><th>Ticket</th><th>Company</th><th>Contact</th><th>Email</th><th>Product</th><th>Quantity</th><th>Delivery</th><th>Expires</th></tr></thead>
                <tbody id="quotation-rows"></tbody>
            </table>
        </section>
        <section class="panel tab-panel" id="panel-enquiries" style="display:none">
            <h2>Contact enquiries</h2>
            <table>
                <thead><tr><th>Ticket</th><th>Name</th><th>Email</th><th>Message</th><th>Received</th></tr></thead>
                <tbody id="enquiry-rows"></tbody>
            </table>
        </section>
        <section class="panel tab-panel" id="panel-lois" style="display:none">
            <h2>LOI submissions</h2>
            <table>
                <thead><tr><th>Company</th><th>Representative</th><th>Email</th><th>Product</th><th>Quantity</th><th>Submitted</th></tr></thead>
                <tbody id="loi-rows"></tbody>
            </table>
        </section>
        {footer}
    </main>
{script}
</body>
</html>"#,
        styles = ADMIN_BASE_STYLES,
        username = escape_html(username),
        footer = footer,
        script = DASHBOARD_SCRIPT,
    )
}

pub fn render_footer() -> String {
    let current_year = Utc::now().year();
    format!(
        r#"<footer class="app-footer">© {year} QuoteDesk, internal use only</footer>"#,
        year = current_year
    )
}

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html(r#"<b onclick="x('&')">"#),
            "&lt;b onclick=&quot;x(&#39;&amp;&#39;)&quot;&gt;"
        );
    }

    #[test]
    fn login_page_renders_error_when_present() {
        let page = render_login_page(Some("Invalid credentials. Please try again."));
        assert!(page.contains("Invalid credentials."));
        let clean = render_login_page(None);
        assert!(!clean.contains("class=\"error\""));
    }
}
