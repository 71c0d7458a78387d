use crate::models::UserSnapshot;

/// Taps needed on the dashboard before the daily bonus request is sent.
pub const CLICKER_TAPS: u32 = 10;

pub fn render_index(user: &UserSnapshot) -> String {
    INDEX_HTML
        .replace("{{USERNAME}}", &escape_html(&user.username))
        .replace("{{POINTS}}", &user.total_points.to_string())
        .replace("{{STREAK}}", &user.day_streak.to_string())
        .replace("{{TAPS}}", &CLICKER_TAPS.to_string())
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Perk Points</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --muted: #5f5c57;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --ok: #2e7d5b;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(920px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1, h2 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      margin: 0;
    }

    h1 {
      font-size: clamp(1.8rem, 4vw, 2.6rem);
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      background: #fff;
      border-radius: 20px;
      padding: 18px 20px;
      box-shadow: 0 10px 24px rgba(47, 72, 88, 0.08);
    }

    .stat-label {
      color: var(--muted);
      font-size: 0.9rem;
    }

    .stat-value {
      font-size: 2rem;
      font-weight: 600;
    }

    .actions {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
    }

    button {
      font: inherit;
      border: none;
      border-radius: 999px;
      padding: 12px 22px;
      cursor: pointer;
      background: var(--accent);
      color: #fff;
      transition: transform 120ms ease, opacity 120ms ease;
    }

    button:active {
      transform: scale(0.97);
    }

    button:disabled {
      opacity: 0.45;
      cursor: default;
    }

    button.secondary {
      background: var(--accent-2);
    }

    button.ghost {
      background: transparent;
      color: var(--accent-2);
      border: 1px solid var(--accent-2);
    }

    .status {
      min-height: 1.4em;
      color: var(--muted);
    }

    .status[data-type="ok"] {
      color: var(--ok);
    }

    .status[data-type="error"] {
      color: var(--accent);
    }

    .catalog {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(200px, 1fr));
      gap: 14px;
    }

    .benefit {
      background: #fff;
      border-radius: 18px;
      padding: 16px;
      display: grid;
      gap: 10px;
    }

    .benefit .cost {
      color: var(--muted);
    }

    .benefit .code {
      font-family: monospace;
      font-size: 1.1rem;
      letter-spacing: 0.12em;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Hello, {{USERNAME}}!</h1>
      <p class="subtitle">Check in every day, keep your streak, and trade points for perks.</p>
    </header>

    <section class="stats">
      <div class="stat">
        <div class="stat-label">Points</div>
        <div class="stat-value" id="points">{{POINTS}}</div>
      </div>
      <div class="stat">
        <div class="stat-label">Day streak</div>
        <div class="stat-value" id="streak">{{STREAK}}</div>
      </div>
      <div class="stat">
        <div class="stat-label">Next daily bonus</div>
        <div class="stat-value" id="countdown">--:--:--</div>
      </div>
    </section>

    <section class="actions">
      <button id="checkin">Daily check-in</button>
      <button id="clicker" class="secondary">Tap for bonus (0 / {{TAPS}})</button>
      <button id="reset" class="ghost">Reset</button>
    </section>

    <p class="status" id="status" aria-live="polite"></p>

    <section>
      <h2>Rewards</h2>
      <div class="catalog" id="catalog"></div>
    </section>

    <section>
      <h2>Redeemed</h2>
      <div class="catalog" id="redeemed"></div>
    </section>
  </main>

  <script>
    const TAPS = {{TAPS}};
    const pointsEl = document.getElementById('points');
    const streakEl = document.getElementById('streak');
    const countdownEl = document.getElementById('countdown');
    const statusEl = document.getElementById('status');
    const catalogEl = document.getElementById('catalog');
    const redeemedEl = document.getElementById('redeemed');
    const checkinBtn = document.getElementById('checkin');
    const clickerBtn = document.getElementById('clicker');
    const resetBtn = document.getElementById('reset');

    let taps = 0;
    let secondsLeft = null;
    let user = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const pad = (value) => String(value).padStart(2, '0');

    const renderCountdown = () => {
      if (secondsLeft === null) {
        countdownEl.textContent = '--:--:--';
        return;
      }
      if (user && user.clickerAvailable) {
        countdownEl.textContent = 'Ready';
        return;
      }
      const s = Math.max(0, secondsLeft);
      countdownEl.textContent = `${pad(Math.floor(s / 3600))}:${pad(Math.floor((s % 3600) / 60))}:${pad(s % 60)}`;
    };

    const updateUser = (data) => {
      user = data;
      pointsEl.textContent = data.totalPoints;
      streakEl.textContent = data.dayStreak;
      checkinBtn.disabled = data.checkedInToday;
      clickerBtn.disabled = !data.clickerAvailable;
      secondsLeft = data.secondsUntilMidnight;
      renderCountdown();
    };

    const renderCatalog = (items) => {
      catalogEl.innerHTML = '';
      items.forEach((item) => {
        const card = document.createElement('div');
        card.className = 'benefit';
        const title = document.createElement('strong');
        title.textContent = item.title;
        const cost = document.createElement('span');
        cost.className = 'cost';
        cost.textContent = `${item.cost} pts`;
        const button = document.createElement('button');
        button.textContent = item.redeemed ? 'Redeemed' : 'Redeem';
        button.disabled = item.redeemed || (user && user.totalPoints < item.cost);
        button.addEventListener('click', () => {
          if (confirm(`Redeem ${item.title} for ${item.cost} points?`)) {
            act('redeem', `&itemId=${item.id}`).catch((err) => setStatus(err.message, 'error'));
          }
        });
        card.append(title, cost, button);
        catalogEl.appendChild(card);
      });
    };

    const renderRedeemed = (items) => {
      redeemedEl.innerHTML = '';
      if (!items.length) {
        redeemedEl.textContent = 'No redeemed items yet.';
        return;
      }
      items.forEach((item) => {
        const card = document.createElement('div');
        card.className = 'benefit';
        const title = document.createElement('strong');
        title.textContent = item.title;
        const code = document.createElement('span');
        code.className = 'code';
        code.textContent = item.code;
        card.append(title, code);
        redeemedEl.appendChild(card);
      });
    };

    const refresh = async () => {
      const res = await fetch('/api/points');
      if (!res.ok) {
        throw new Error('Unable to load points');
      }
      const data = await res.json();
      updateUser(data.userData);
      renderCatalog(data.shopItems || []);
      const redeemed = await fetch('/api/redeemed');
      if (redeemed.ok) {
        renderRedeemed((await redeemed.json()).items);
      }
    };

    const act = async (action, extra = '') => {
      const res = await fetch(`/api/points?action=${action}${extra}`);
      const data = await res.json();
      if (!res.ok) {
        throw new Error(data.message || 'Request failed');
      }
      updateUser(data.userData);
      setStatus(data.message, data.success ? 'ok' : 'error');
      await refresh();
      return data;
    };

    checkinBtn.addEventListener('click', () => {
      act('checkin').catch((err) => setStatus(err.message, 'error'));
    });

    clickerBtn.addEventListener('click', () => {
      taps += 1;
      if (taps < TAPS) {
        clickerBtn.textContent = `Tap for bonus (${taps} / ${TAPS})`;
        return;
      }
      taps = 0;
      clickerBtn.textContent = `Tap for bonus (0 / ${TAPS})`;
      act('clicker').catch((err) => setStatus(err.message, 'error'));
    });

    resetBtn.addEventListener('click', () => {
      if (confirm('Reset points, streak and redemptions?')) {
        act('reset').catch((err) => setStatus(err.message, 'error'));
      }
    });

    setInterval(() => {
      if (secondsLeft === null) {
        return;
      }
      secondsLeft -= 1;
      if (secondsLeft <= 0) {
        refresh().catch((err) => setStatus(err.message, 'error'));
        secondsLeft = null;
      }
      renderCountdown();
    }, 1000);

    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
