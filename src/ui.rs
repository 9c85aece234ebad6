pub fn render_index(date: &str, version: &str) -> String {
    INDEX_HTML
        .replace("{{DATE}}", date)
        .replace("{{VERSION}}", version)
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Gym Dashboard</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f4f1ea;
      --bg-2: #cfe3d4;
      --ink: #22271f;
      --accent: #e4572e;
      --accent-2: #2f4858;
      --good: #2d7a4b;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e8f0e4 60%, #f3efe7 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 28px 16px 48px;
    }

    .app {
      width: min(920px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 22px;
    }

    header h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.5rem);
      margin: 0;
    }

    .subtitle {
      margin: 4px 0 0;
      color: #5f645a;
      font-size: 0.98rem;
    }

    .tabs {
      display: flex;
      flex-wrap: wrap;
      gap: 6px;
      padding: 6px;
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
      width: fit-content;
    }

    .tab {
      appearance: none;
      background: transparent;
      border: none;
      border-radius: 999px;
      padding: 8px 16px;
      font-size: 0.92rem;
      font-weight: 600;
      color: #6b6f64;
      cursor: pointer;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(47, 72, 88, 0.12);
    }

    .panel {
      display: none;
      gap: 18px;
    }

    .panel.active {
      display: grid;
    }

    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(170px, 1fr));
      gap: 14px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b8f83;
    }

    .stat .value {
      font-size: 1.45rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .focus {
      background: white;
      border-left: 6px solid var(--accent);
      border-radius: 14px;
      padding: 14px 18px;
      font-size: 1.05rem;
    }

    .card {
      background: white;
      border-radius: 20px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 12px;
    }

    .card h2 {
      margin: 0;
      font-size: 1.15rem;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.92rem;
    }

    th, td {
      text-align: left;
      padding: 7px 8px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    th {
      font-size: 0.78rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #8b8f83;
    }

    .pr-badge {
      display: inline-block;
      background: var(--accent);
      color: white;
      border-radius: 999px;
      font-size: 0.72rem;
      font-weight: 600;
      padding: 2px 8px;
      margin-left: 6px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent-2);
      color: white;
    }

    button.primary {
      background: var(--accent);
    }

    button.ghost {
      background: rgba(47, 72, 88, 0.1);
      color: var(--accent-2);
      padding: 7px 12px;
      font-size: 0.85rem;
    }

    input, select {
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 10px;
      padding: 9px 10px;
      font-size: 0.95rem;
      font-family: inherit;
      background: white;
    }

    .row {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      align-items: center;
    }

    .set-row input {
      width: 110px;
    }

    ul.plain {
      margin: 0;
      padding-left: 18px;
    }

    #lift-chart, #bw-chart {
      width: 100%;
      height: 240px;
      display: block;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 3;
    }

    .chart-point {
      fill: white;
      stroke: var(--accent);
      stroke-width: 2;
    }

    .chart-grid {
      stroke: rgba(47, 72, 88, 0.12);
    }

    .chart-label {
      fill: #7a7e72;
      font-size: 11px;
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    .status {
      font-size: 0.95rem;
      color: #6b6f64;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: var(--good);
    }

    .muted {
      color: #8b8f83;
      font-size: 0.88rem;
    }

    @media (max-width: 620px) {
      .app {
        padding: 24px 18px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Gym Dashboard</h1>
      <p class="subtitle">{{DATE}} &middot; local-first &middot; v{{VERSION}}</p>
    </header>

    <nav class="tabs" role="tablist">
      <button class="tab active" data-tab="today" type="button">Today</button>
      <button class="tab" data-tab="lifts" type="button">Lifts</button>
      <button class="tab" data-tab="routines" type="button">Routines</button>
      <button class="tab" data-tab="body" type="button">Body</button>
      <button class="tab" data-tab="data" type="button">Data</button>
    </nav>

    <section class="panel active" id="panel-today">
      <div class="focus" id="focus-message">Loading...</div>
      <div class="cards">
        <div class="stat">
          <span class="label">Plan</span>
          <span class="value" id="today-label">-</span>
        </div>
        <div class="stat">
          <span class="label">This week</span>
          <span class="value" id="week-count">0 / 0</span>
        </div>
        <div class="stat">
          <span class="label">Protein</span>
          <span class="value" id="protein-summary">0 g</span>
        </div>
        <div class="stat">
          <span class="label">Bodyweight</span>
          <span class="value" id="bw-summary">-</span>
        </div>
      </div>
      <div class="card">
        <h2 id="today-heading">Scheduled today</h2>
        <ul class="plain" id="today-exercises"></ul>
        <div class="row">
          <button class="primary" id="checkin-btn" type="button">Check in</button>
        </div>
      </div>
      <div class="card">
        <h2>Protein today</h2>
        <div class="row" id="protein-row">
          <input type="number" min="0" id="protein-morning" placeholder="Morning" />
          <input type="number" min="0" id="protein-lunch" placeholder="Lunch" />
          <input type="number" min="0" id="protein-pre" placeholder="Pre" />
          <input type="number" min="0" id="protein-dinner" placeholder="Dinner" />
          <input type="number" min="0" id="protein-bed" placeholder="Bed" />
          <button id="protein-save" type="button">Save</button>
        </div>
        <p class="muted" id="protein-status"></p>
      </div>
    </section>

    <section class="panel" id="panel-lifts">
      <div class="card">
        <h2>Log a lift</h2>
        <div class="row">
          <input list="exercise-names" id="lift-exercise" placeholder="Exercise" />
          <datalist id="exercise-names"></datalist>
          <input type="date" id="lift-date" />
        </div>
        <div id="set-rows"></div>
        <div class="row">
          <button class="ghost" id="add-set" type="button">+ set</button>
          <button class="primary" id="save-lift" type="button">Save lift</button>
        </div>
      </div>
      <div class="card">
        <h2>Trend</h2>
        <div class="tabs">
          <button class="tab active" data-metric="top_weight" type="button">Top weight</button>
          <button class="tab" data-metric="one_rep_max" type="button">Est. 1RM</button>
          <button class="tab" data-metric="volume" type="button">Volume</button>
        </div>
        <svg id="lift-chart" viewBox="0 0 640 240" role="img" aria-label="Lift trend"></svg>
        <p class="muted" id="lift-stats-line"></p>
      </div>
      <div class="card">
        <h2>History</h2>
        <table>
          <thead>
            <tr><th>Date</th><th>Exercise</th><th>Top set</th><th>Sets</th><th></th></tr>
          </thead>
          <tbody id="lift-history"></tbody>
        </table>
      </div>
    </section>

    <section class="panel" id="panel-routines">
      <div class="card">
        <h2>Routines</h2>
        <div id="routine-list"></div>
      </div>
      <div class="card">
        <h2>New routine</h2>
        <div class="row">
          <input id="new-routine-name" placeholder="Name" />
          <select id="new-routine-template">
            <option value="ppl">Push / Pull / Legs</option>
            <option value="upper-lower">Upper / Lower</option>
            <option value="full-body">Full Body (3 day)</option>
            <option value="body-part">Body-Part Split</option>
            <option value="">Blank</option>
          </select>
          <button class="primary" id="create-routine" type="button">Create</button>
        </div>
      </div>
      <div class="card" id="active-routine-card">
        <h2 id="active-routine-title">Active routine</h2>
        <div id="active-routine-days"></div>
      </div>
    </section>

    <section class="panel" id="panel-body">
      <div class="card">
        <h2>Bodyweight</h2>
        <div class="row">
          <input type="date" id="bw-date" />
          <input type="number" step="0.1" min="0" id="bw-weight" placeholder="Weight (lbs)" />
          <button class="primary" id="bw-save" type="button">Save</button>
        </div>
        <div class="cards">
          <div class="stat">
            <span class="label">Latest</span>
            <span class="value" id="bw-latest">-</span>
          </div>
          <div class="stat">
            <span class="label">Change</span>
            <span class="value" id="bw-delta">-</span>
          </div>
          <div class="stat">
            <span class="label">7-day avg</span>
            <span class="value" id="bw-avg">-</span>
          </div>
        </div>
        <svg id="bw-chart" viewBox="0 0 640 240" role="img" aria-label="Bodyweight trend"></svg>
      </div>
    </section>

    <section class="panel" id="panel-data">
      <div class="card">
        <h2>Backup</h2>
        <div class="row">
          <button class="primary" id="export-btn" type="button">Download backup</button>
          <input type="file" id="import-file" accept="application/json" />
          <button id="import-btn" type="button">Import</button>
        </div>
        <p class="muted" id="backup-info"></p>
      </div>
      <div class="card">
        <h2>Settings</h2>
        <div class="row">
          <input id="profile-name" placeholder="Your name" />
          <input type="number" min="1" id="profile-protein" placeholder="Protein goal (g)" />
          <select id="profile-weekstart">
            <option value="mon">Week starts Monday</option>
            <option value="sun">Week starts Sunday</option>
          </select>
          <button id="profile-save" type="button">Save</button>
        </div>
      </div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const byId = (id) => document.getElementById(id);
    const statusEl = byId('status');

    let activeMetric = 'top_weight';
    let currentExercise = '';

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
      if (type === 'ok') {
        setTimeout(() => { statusEl.textContent = ''; }, 1500);
      }
    };

    const api = async (path, options) => {
      const res = await fetch(path, options);
      if (!res.ok) {
        throw new Error(await res.text() || 'Request failed');
      }
      return res.json();
    };

    const post = (path, body) => api(path, {
      method: 'POST',
      headers: { 'content-type': 'application/json' },
      body: JSON.stringify(body)
    });

    /* ---- tabs ---- */
    const navTabs = Array.from(document.querySelectorAll('nav .tab'));
    navTabs.forEach((tab) => {
      tab.addEventListener('click', () => {
        navTabs.forEach((t) => t.classList.toggle('active', t === tab));
        document.querySelectorAll('.panel').forEach((panel) => {
          panel.classList.toggle('active', panel.id === 'panel-' + tab.dataset.tab);
        });
        post('/api/screen', { screen: tab.dataset.tab }).catch(() => {});
        refreshAll().catch((err) => setStatus(err.message, 'error'));
      });
    });

    /* ---- chart (shared) ---- */
    const renderLineChart = (svg, points) => {
      if (!points.length) {
        svg.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet</text>';
        return;
      }
      const width = 640;
      const height = 240;
      const paddingX = 48;
      const paddingY = 32;
      const top = 20;

      const values = points.map((p) => p.value);
      let min = Math.min(...values);
      let max = Math.max(...values);
      if (min === max) {
        min -= 1;
        max += 1;
      }
      const range = max - min;
      const xStep = points.length > 1 ? (width - paddingX * 2) / (points.length - 1) : 0;
      const scaleY = (height - top - paddingY) / range;
      const x = (i) => paddingX + i * xStep;
      const y = (v) => height - paddingY - (v - min) * scaleY;

      const path = points
        .map((p, i) => (i === 0 ? 'M' : 'L') + ' ' + x(i).toFixed(2) + ' ' + y(p.value).toFixed(2))
        .join(' ');

      let grid = '';
      const ticks = 4;
      for (let i = 0; i <= ticks; i += 1) {
        const value = min + (range * i) / ticks;
        const yPos = y(value);
        grid += '<line class="chart-grid" x1="' + paddingX + '" y1="' + yPos + '" x2="' + (width - paddingX) + '" y2="' + yPos + '" />';
        grid += '<text class="chart-label" x="' + (paddingX - 10) + '" y="' + (yPos + 4) + '" text-anchor="end">' + (Math.round(value * 10) / 10) + '</text>';
      }

      const labelEvery = points.length > 8 ? Math.ceil(points.length / 8) : 1;
      const labels = points
        .map((p, i) => (i % labelEvery === 0
          ? '<text class="chart-label" x="' + x(i) + '" y="' + (height - paddingY + 18) + '" text-anchor="middle">' + p.label + '</text>'
          : ''))
        .join('');

      const circles = points
        .map((p, i) => '<circle class="chart-point" cx="' + x(i) + '" cy="' + y(p.value) + '" r="4" />')
        .join('');

      svg.innerHTML = grid + '<path class="chart-line" d="' + path + '" />' + circles + labels;
    };

    /* ---- today ---- */
    const loadToday = async () => {
      const today = await api('/api/today');
      byId('focus-message').textContent = today.focus;
      byId('today-label').textContent = today.plan.rest ? 'Rest' : (today.plan.label || '-');
      byId('week-count').textContent = today.attended_this_week + ' / ' + today.weekly_target;
      byId('protein-summary').textContent = Math.round(today.protein_total) + ' / ' + today.protein_goal + ' g';
      byId('bw-summary').textContent = today.bodyweight.latest ? today.bodyweight.latest.weight + ' lbs' : '-';
      byId('today-heading').textContent = today.plan.rest ? 'Rest day' : 'Scheduled today';
      byId('checkin-btn').textContent = today.attended_today ? 'Checked in' : 'Check in';

      const list = byId('today-exercises');
      list.innerHTML = '';
      today.plan.exercises.forEach((ex) => {
        const li = document.createElement('li');
        li.textContent = ex.name + ' - ' + ex.sets + ' x ' + (ex.reps || '?');
        list.appendChild(li);
      });

      const protein = await api('/api/protein');
      byId('protein-morning').value = protein.slots.morning || '';
      byId('protein-lunch').value = protein.slots.lunch || '';
      byId('protein-pre').value = protein.slots.pre || '';
      byId('protein-dinner').value = protein.slots.dinner || '';
      byId('protein-bed').value = protein.slots.bed || '';
      byId('protein-status').textContent =
        Math.round(protein.total) + ' g logged, ' + Math.round(protein.remaining) + ' g to go (' + protein.status + ')';
    };

    byId('checkin-btn').addEventListener('click', () => {
      post('/api/attendance/toggle', {})
        .then(() => refreshAll())
        .then(() => setStatus('Saved', 'ok'))
        .catch((err) => setStatus(err.message, 'error'));
    });

    byId('protein-save').addEventListener('click', () => {
      const grams = (id) => Number(byId(id).value) || 0;
      post('/api/protein', {
        morning: grams('protein-morning'),
        lunch: grams('protein-lunch'),
        pre: grams('protein-pre'),
        dinner: grams('protein-dinner'),
        bed: grams('protein-bed')
      })
        .then(() => refreshAll())
        .then(() => setStatus('Saved', 'ok'))
        .catch((err) => setStatus(err.message, 'error'));
    });

    /* ---- lifts ---- */
    const addSetRow = (weight, reps) => {
      const row = document.createElement('div');
      row.className = 'row set-row';
      const w = document.createElement('input');
      w.type = 'number';
      w.step = '0.5';
      w.min = '0';
      w.placeholder = 'Weight';
      if (weight) { w.value = weight; }
      const r = document.createElement('input');
      r.type = 'number';
      r.min = '0';
      r.placeholder = 'Reps';
      if (reps) { r.value = reps; }
      row.appendChild(w);
      row.appendChild(r);
      byId('set-rows').appendChild(row);
    };

    byId('add-set').addEventListener('click', () => addSetRow());

    byId('save-lift').addEventListener('click', () => {
      const sets = Array.from(document.querySelectorAll('.set-row'))
        .map((row) => {
          const inputs = row.querySelectorAll('input');
          return { weight: Number(inputs[0].value) || 0, reps: Number(inputs[1].value) || 0 };
        });
      post('/api/lifts', {
        exercise: byId('lift-exercise').value,
        date: byId('lift-date').value || null,
        sets
      })
        .then((entry) => {
          currentExercise = entry.exercise;
          byId('set-rows').innerHTML = '';
          addSetRow();
          return refreshAll();
        })
        .then(() => setStatus('Lift saved', 'ok'))
        .catch((err) => setStatus(err.message, 'error'));
    });

    const loadLifts = async () => {
      const names = await api('/api/exercises');
      const datalist = byId('exercise-names');
      datalist.innerHTML = '';
      names.names.forEach((name) => {
        const option = document.createElement('option');
        option.value = name;
        datalist.appendChild(option);
      });

      const history = await api('/api/lifts?limit=20');
      const body = byId('lift-history');
      body.innerHTML = '';
      history.entries.forEach((entry) => {
        const tr = document.createElement('tr');
        const exercise = document.createElement('td');
        exercise.textContent = entry.exercise;
        if (entry.personal_record) {
          const badge = document.createElement('span');
          badge.className = 'pr-badge';
          badge.textContent = 'PR';
          exercise.appendChild(badge);
        }
        const date = document.createElement('td');
        date.textContent = entry.date;
        const topSet = document.createElement('td');
        topSet.textContent = entry.top_weight + ' x ' + entry.top_reps;
        const sets = document.createElement('td');
        sets.textContent = entry.set_count;
        const actions = document.createElement('td');
        const del = document.createElement('button');
        del.className = 'ghost';
        del.textContent = 'Delete';
        del.addEventListener('click', () => {
          fetch('/api/lifts/' + entry.id, { method: 'DELETE' })
            .then(() => refreshAll())
            .catch((err) => setStatus(err.message, 'error'));
        });
        actions.appendChild(del);
        tr.appendChild(date);
        tr.appendChild(exercise);
        tr.appendChild(topSet);
        tr.appendChild(sets);
        tr.appendChild(actions);
        body.appendChild(tr);
      });

      const exercise = currentExercise || byId('lift-exercise').value ||
        (history.entries.length ? history.entries[0].exercise : '');
      if (!exercise) {
        renderLineChart(byId('lift-chart'), []);
        byId('lift-stats-line').textContent = 'Log a lift to see trends.';
        return;
      }
      const trend = await api('/api/lifts/trend?exercise=' + encodeURIComponent(exercise) + '&metric=' + activeMetric);
      renderLineChart(
        byId('lift-chart'),
        trend.labels.map((label, i) => ({ label: label.slice(5), value: trend.series[i] }))
      );
      const stats = await api('/api/lifts/stats?exercise=' + encodeURIComponent(exercise));
      const fmt = (v) => (v === null ? '-' : v);
      byId('lift-stats-line').textContent =
        exercise + ': lifetime max ' + fmt(stats.lifetime_max) +
        ', this week ' + fmt(stats.this_week_max) +
        ', last week ' + fmt(stats.last_week_max) +
        (stats.stalled ? ' - stalled' : '');
    };

    document.querySelectorAll('[data-metric]').forEach((tab) => {
      tab.addEventListener('click', () => {
        activeMetric = tab.dataset.metric;
        document.querySelectorAll('[data-metric]').forEach((t) => t.classList.toggle('active', t === tab));
        loadLifts().catch((err) => setStatus(err.message, 'error'));
      });
    });

    byId('lift-exercise').addEventListener('change', () => {
      currentExercise = byId('lift-exercise').value;
      loadLifts().catch((err) => setStatus(err.message, 'error'));
    });

    /* ---- routines ---- */
    const loadRoutines = async () => {
      const data = await api('/api/routines');
      const list = byId('routine-list');
      list.innerHTML = '';
      data.routines.forEach((routine) => {
        const row = document.createElement('div');
        row.className = 'row';
        const name = document.createElement('strong');
        name.textContent = routine.name + (routine.id === data.active_id ? ' (active)' : '');
        row.appendChild(name);

        const actions = [
          ['Activate', () => post('/api/routines/' + routine.id + '/activate', {})],
          ['Duplicate', () => post('/api/routines/' + routine.id + '/duplicate', {})],
          ['Delete', () => fetch('/api/routines/' + routine.id, { method: 'DELETE' }).then((res) => {
            if (!res.ok) { return res.text().then((msg) => { throw new Error(msg); }); }
            return res.json();
          })]
        ];
        actions.forEach(([label, action]) => {
          const btn = document.createElement('button');
          btn.className = 'ghost';
          btn.textContent = label;
          btn.addEventListener('click', () => {
            action()
              .then(() => refreshAll())
              .then(() => setStatus('Saved', 'ok'))
              .catch((err) => setStatus(err.message, 'error'));
          });
          row.appendChild(btn);
        });
        list.appendChild(row);
      });

      const active = data.routines.find((r) => r.id === data.active_id) || data.routines[0];
      if (!active) { return; }
      byId('active-routine-title').textContent = active.name;
      const days = byId('active-routine-days');
      days.innerHTML = '';
      ['mon', 'tue', 'wed', 'thu', 'fri', 'sat', 'sun'].forEach((key) => {
        const plan = active.days[key] || { label: '', rest: false, exercises: [] };
        const line = document.createElement('p');
        line.className = 'muted';
        const names = plan.exercises.map((ex) => ex.name).join(', ');
        line.textContent = key.toUpperCase() + ': ' +
          (plan.rest ? 'Rest' : (plan.label || 'Open') + (names ? ' - ' + names : ''));
        days.appendChild(line);
      });
    };

    byId('create-routine').addEventListener('click', () => {
      const template = byId('new-routine-template').value || null;
      post('/api/routines', {
        name: byId('new-routine-name').value || 'My Routine',
        template
      })
        .then(() => refreshAll())
        .then(() => setStatus('Routine created', 'ok'))
        .catch((err) => setStatus(err.message, 'error'));
    });

    /* ---- body ---- */
    const loadBody = async () => {
      const data = await api('/api/bodyweight');
      const fmt = (v, suffix) => (v === null || v === undefined ? '-' : (Math.round(v * 10) / 10) + (suffix || ''));
      byId('bw-latest').textContent = data.stats.latest ? fmt(data.stats.latest.weight, ' lbs') : '-';
      byId('bw-delta').textContent = fmt(data.stats.delta);
      byId('bw-avg').textContent = fmt(data.stats.week_avg);
      renderLineChart(
        byId('bw-chart'),
        data.entries.slice(-30).map((entry) => ({ label: entry.date.slice(5), value: entry.weight }))
      );
    };

    byId('bw-save').addEventListener('click', () => {
      post('/api/bodyweight', {
        date: byId('bw-date').value || null,
        weight: Number(byId('bw-weight').value)
      })
        .then(() => refreshAll())
        .then(() => setStatus('Saved', 'ok'))
        .catch((err) => setStatus(err.message, 'error'));
    });

    /* ---- data ---- */
    const loadData = async () => {
      const status = await api('/api/status');
      const parts = ['v' + status.version];
      if (status.updated) {
        parts.push('updated from v' + status.previous_version);
      }
      parts.push(status.last_backup ? 'last backup ' + status.last_backup : 'never backed up');
      byId('backup-info').textContent = parts.join(' - ');

      const profile = await api('/api/profile');
      byId('profile-name').value = profile.name;
      byId('profile-protein').value = profile.protein_goal;
      byId('profile-weekstart').value = profile.week_start;
    };

    byId('export-btn').addEventListener('click', () => {
      api('/api/export')
        .then((doc) => {
          const blob = new Blob([JSON.stringify(doc, null, 2)], { type: 'application/json' });
          const link = document.createElement('a');
          link.href = URL.createObjectURL(blob);
          link.download = 'gym-backup-' + doc.exportedAt.slice(0, 10) + '.json';
          link.click();
          URL.revokeObjectURL(link.href);
          return refreshAll();
        })
        .then(() => setStatus('Backup downloaded', 'ok'))
        .catch((err) => setStatus(err.message, 'error'));
    });

    byId('import-btn').addEventListener('click', () => {
      const file = byId('import-file').files[0];
      if (!file) {
        setStatus('Choose a backup file first', 'error');
        return;
      }
      file.text()
        .then((text) => post('/api/import', JSON.parse(text)))
        .then(() => refreshAll())
        .then(() => setStatus('Backup restored', 'ok'))
        .catch((err) => setStatus(err.message, 'error'));
    });

    byId('profile-save').addEventListener('click', () => {
      api('/api/profile', {
        method: 'PUT',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({
          name: byId('profile-name').value,
          protein_goal: Number(byId('profile-protein').value) || null,
          week_start: byId('profile-weekstart').value
        })
      })
        .then(() => refreshAll())
        .then(() => setStatus('Saved', 'ok'))
        .catch((err) => setStatus(err.message, 'error'));
    });

    const refreshAll = () =>
      Promise.all([loadToday(), loadLifts(), loadRoutines(), loadBody(), loadData()]);

    addSetRow();
    refreshAll().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"##;
