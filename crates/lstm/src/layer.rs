//! Forward and backward passes of a single LSTM layer.

use ndarray::linalg::general_mat_mul;
use ndarray::{Array1, Axis, s};

use crate::params::LayerParams;

/// Activations of one time step, kept for backpropagation.
#[derive(Debug, Clone)]
pub(crate) struct StepCache {
    pub(crate) x: Array1<f64>,
    pub(crate) h_prev: Array1<f64>,
    pub(crate) c_prev: Array1<f64>,
    pub(crate) i: Array1<f64>,
    pub(crate) f: Array1<f64>,
    pub(crate) g: Array1<f64>,
    pub(crate) o: Array1<f64>,
    pub(crate) c: Array1<f64>,
    pub(crate) tanh_c: Array1<f64>,
    pub(crate) h: Array1<f64>,
}

fn sigmoid(v: f64) -> f64 {
    1.0 / (1.0 + (-v).exp())
}

impl LayerParams {
    /// Runs one time step from state `(h_prev, c_prev)` on input `x`.
    pub(crate) fn step(&self, x: Array1<f64>, h_prev: Array1<f64>, c_prev: Array1<f64>) -> StepCache {
        let h = self.hidden();
        let z = self.w.dot(&x) + self.u.dot(&h_prev) + &self.b;

        let i = z.slice(s![0..h]).mapv(sigmoid);
        let f = z.slice(s![h..2 * h]).mapv(sigmoid);
        let g = z.slice(s![2 * h..3 * h]).mapv(f64::tanh);
        let o = z.slice(s![3 * h..]).mapv(sigmoid);

        let c = &f * &c_prev + &i * &g;
        let tanh_c = c.mapv(f64::tanh);
        let h_next = &o * &tanh_c;

        StepCache {
            x,
            h_prev,
            c_prev,
            i,
            f,
            g,
            o,
            c,
            tanh_c,
            h: h_next,
        }
    }

    /// Runs the layer over a whole sequence starting from a zero state.
    pub(crate) fn forward(&self, inputs: Vec<Array1<f64>>) -> Vec<StepCache> {
        let h = self.hidden();
        let mut h_prev = Array1::zeros(h);
        let mut c_prev = Array1::zeros(h);
        let mut caches = Vec::with_capacity(inputs.len());
        for x in inputs {
            let cache = self.step(x, h_prev, c_prev);
            h_prev = cache.h.clone();
            c_prev = cache.c.clone();
            caches.push(cache);
        }
        caches
    }

    /// Backpropagates through time.
    ///
    /// `dh_out[t]` is the loss gradient flowing into the layer output at
    /// step `t` from above. Parameter gradients are accumulated into
    /// `grads`; the returned vector holds the gradient with respect to each
    /// step's input.
    pub(crate) fn backward(
        &self,
        caches: &[StepCache],
        dh_out: &[Array1<f64>],
        grads: &mut LayerParams,
    ) -> Vec<Array1<f64>> {
        let h = self.hidden();
        let mut dh_next = Array1::<f64>::zeros(h);
        let mut dc_next = Array1::<f64>::zeros(h);
        let mut dx = vec![Array1::zeros(0); caches.len()];

        for t in (0..caches.len()).rev() {
            let cache = &caches[t];
            let dh = &dh_out[t] + &dh_next;

            let d_o = &dh * &cache.tanh_c;
            let dc = &dc_next + &(&dh * &cache.o * &cache.tanh_c.mapv(|v| 1.0 - v * v));
            let d_i = &dc * &cache.g;
            let d_g = &dc * &cache.i;
            let d_f = &dc * &cache.c_prev;
            dc_next = &dc * &cache.f;

            let mut dz = Array1::<f64>::zeros(4 * h);
            dz.slice_mut(s![0..h])
                .assign(&(&d_i * &cache.i.mapv(|v| v * (1.0 - v))));
            dz.slice_mut(s![h..2 * h])
                .assign(&(&d_f * &cache.f.mapv(|v| v * (1.0 - v))));
            dz.slice_mut(s![2 * h..3 * h])
                .assign(&(&d_g * &cache.g.mapv(|v| 1.0 - v * v)));
            dz.slice_mut(s![3 * h..])
                .assign(&(&d_o * &cache.o.mapv(|v| v * (1.0 - v))));

            let dz_col = dz.view().insert_axis(Axis(1));
            general_mat_mul(
                1.0,
                &dz_col,
                &cache.x.view().insert_axis(Axis(0)),
                1.0,
                &mut grads.w,
            );
            general_mat_mul(
                1.0,
                &dz_col,
                &cache.h_prev.view().insert_axis(Axis(0)),
                1.0,
                &mut grads.u,
            );
            grads.b += &dz;

            dx[t] = self.w.t().dot(&dz);
            dh_next = self.u.t().dot(&dz);
        }
        dx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    fn tiny_layer() -> LayerParams {
        // hidden = 1, n_in = 1: rows are i, f, g, o
        LayerParams {
            w: Array2::from_shape_vec((4, 1), vec![0.5, -0.3, 0.8, 0.1]).unwrap(),
            u: Array2::from_shape_vec((4, 1), vec![0.2, 0.4, -0.6, 0.7]).unwrap(),
            b: array![0.0, 1.0, 0.0, 0.0],
        }
    }

    #[test]
    fn step_matches_hand_computation() {
        let layer = tiny_layer();
        let cache = layer.step(array![1.0], array![0.0], array![0.0]);
        let i = sigmoid(0.5);
        let g = 0.8f64.tanh();
        let o = sigmoid(0.1);
        let c = i * g; // forget gate multiplies a zero cell state
        assert!((cache.c[0] - c).abs() < 1e-12);
        assert!((cache.h[0] - o * c.tanh()).abs() < 1e-12);
    }

    #[test]
    fn forward_carries_state() {
        let layer = tiny_layer();
        let caches = layer.forward(vec![array![1.0], array![0.5], array![-0.2]]);
        assert_eq!(caches.len(), 3);
        for t in 1..3 {
            assert_eq!(caches[t].h_prev, caches[t - 1].h);
            assert_eq!(caches[t].c_prev, caches[t - 1].c);
        }
    }

    #[test]
    fn backward_matches_finite_differences() {
        // Loss = sum of final hidden state; check d loss / d w numerically.
        let layer = tiny_layer();
        let inputs = vec![array![0.3], array![-0.7], array![0.9]];
        let loss = |l: &LayerParams| l.forward(inputs.clone()).last().unwrap().h.sum();

        let caches = layer.forward(inputs.clone());
        let mut dh_out = vec![Array1::zeros(1); 3];
        dh_out[2] = array![1.0];
        let mut grads = LayerParams {
            w: Array2::zeros((4, 1)),
            u: Array2::zeros((4, 1)),
            b: Array1::zeros(4),
        };
        layer.backward(&caches, &dh_out, &mut grads);

        let eps = 1e-6;
        for r in 0..4 {
            let mut plus = layer.clone();
            plus.w[[r, 0]] += eps;
            let mut minus = layer.clone();
            minus.w[[r, 0]] -= eps;
            let numeric = (loss(&plus) - loss(&minus)) / (2.0 * eps);
            assert!(
                (numeric - grads.w[[r, 0]]).abs() < 1e-7,
                "w[{r}]: numeric {numeric}, analytic {}",
                grads.w[[r, 0]]
            );

            let mut plus = layer.clone();
            plus.u[[r, 0]] += eps;
            let mut minus = layer.clone();
            minus.u[[r, 0]] -= eps;
            let numeric = (loss(&plus) - loss(&minus)) / (2.0 * eps);
            assert!((numeric - grads.u[[r, 0]]).abs() < 1e-7, "u[{r}]");
        }
    }
}
